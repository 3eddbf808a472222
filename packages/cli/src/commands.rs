//! Subcommand implementations.

use std::path::Path;

use dist_gen_map_generation::config::all_presets;
use dist_gen_map_generation::export::write_outputs;
use dist_gen_map_generation::pipeline;
use dist_gen_map_generation::style::{MarkerStyler, group_by_layer};
use dist_gen_map_generation::summary::{find_substation, format_kw, locations_for, summarize};
use dist_gen_map_generation_models::{FacilityId, GenerationLayer};
use dist_gen_map_generation_models::config::MapConfig;

/// Prints substations ordered by descending total generation, followed
/// by a per-layer capacity breakdown.
pub async fn aggregate(config: &MapConfig) -> Result<(), Box<dyn std::error::Error>> {
    let data = pipeline::run(config).await?;

    let mut substations: Vec<_> = data.substations.iter().collect();
    substations.sort_by(|a, b| {
        b.total_generation_kw
            .total_cmp(&a.total_generation_kw)
            .then_with(|| a.name.cmp(&b.name))
    });

    for substation in substations {
        println!(
            "{}\t{}",
            substation.name,
            format_kw(substation.total_generation_kw)
        );
    }

    let layers = group_by_layer(&data.locations);
    println!();
    for layer in GenerationLayer::ALL {
        let members = layers.get(layer).map_or(&[][..], Vec::as_slice);
        let capacity: f64 = members.iter().map(|l| l.capacity_kw).sum();
        println!(
            "{}\t{} locations\t{}",
            layer.label(),
            members.len(),
            format_kw(capacity)
        );
    }

    Ok(())
}

/// Prints the legend as pretty JSON.
pub async fn legend(config: &MapConfig) -> Result<(), Box<dyn std::error::Error>> {
    let data = pipeline::run(config).await?;
    println!("{}", serde_json::to_string_pretty(&data.legend)?);
    Ok(())
}

/// Prints one substation's summary and its connected locations.
pub async fn inspect(config: &MapConfig, id: f64) -> Result<(), Box<dyn std::error::Error>> {
    let id = FacilityId::new(id).ok_or("Substation identifier must be a finite number")?;
    let data = pipeline::run(config).await?;

    let substation = find_substation(&data.substations, id)
        .ok_or_else(|| format!("No substation with identifier {id}"))?;
    let summary = summarize(substation, &data.locations);

    println!("Substation: {}", summary.name);
    println!("Total Generation: {}", summary.total_label);
    println!("Locations: {}", summary.location_count);

    for location in locations_for(&data.locations, id) {
        let kind = location
            .generation_type
            .map_or_else(|| "Unknown".to_string(), |t| t.to_string());
        let label = location
            .feature_id
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        println!("  {label}\t{kind}\t{}", format_kw(location.capacity_kw));
    }

    Ok(())
}

/// Runs the pipeline and writes the export files into `dir`.
pub async fn export(config: &MapConfig, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = pipeline::run(config).await?;
    let styler = MarkerStyler::new(config);
    let paths = write_outputs(&data, &styler, dir).await?;

    println!("{}", paths.substations.display());
    println!("{}", paths.locations.display());
    println!("{}", paths.legend.display());

    Ok(())
}

/// Lists the embedded marker presets.
pub fn presets() {
    for preset in all_presets() {
        println!(
            "{}\tlocation x{}\tsubstation x{}\t{}",
            preset.id, preset.location_scale, preset.substation_scale, preset.name
        );
    }
}
