//! Example: photo analysis to downloadable body scan.
//!
//! Runs the whole flow with a scripted oracle standing in for the
//! image-understanding service: analyze, classify, build the silhouette,
//! cross-check it, export OBJ.
//!
//! Run with: `RUST_LOG=body_measure=debug,body_mesh=info cargo run -p body-mesh --example scan_demo`

use body_measure::{MeasureParams, ScanImage, ScriptedOracle, UserBiometrics, analyze};
use body_mesh::{SilhouetteBuilder, export_file_name};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const ORACLE_REPLY: &str = r#"Sure! Here are the proportions:
```json
{
  "measurements": {
    "waistRatio": 0.165,
    "hipRatio": 0.198,
    "shoulderRatio": 0.243,
    "chestRatio": 0.182,
    "torsoHeightRatio": 0.31
  },
  "confidence": 0.86
}
```"#;

#[tokio::main]
async fn main() -> miette::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let oracle = ScriptedOracle::replying(ORACLE_REPLY);
    let image = ScanImage::jpeg(vec![0xFF, 0xD8, 0xFF, 0xD9]);
    let biometrics = UserBiometrics::new(174.0, 71.5).with_age(52.0);

    let record = analyze(&oracle, &image, &biometrics, &MeasureParams::default()).await?;
    let classes = record.classify();

    println!("Measurements");
    println!("  waist      {:>4} cm", record.waist_circumference_cm());
    println!("  hip        {:>4} cm", record.hip_circumference_cm());
    println!("  BMI        {:>6.1}  ({})", record.bmi(), classes.bmi);
    println!("  WHR        {:>6.2}  ({} risk)", record.whr(), classes.whr);
    println!("  WHtR       {:>6.2}  ({})", record.whtr(), classes.whtr);
    println!("  confidence {:>6.2}", record.confidence());

    let silhouette = SilhouetteBuilder::new(&record).high_detail().build()?;

    println!();
    println!(
        "Silhouette: {} vertices, {} faces, {:.1} L",
        silhouette.mesh().vertex_count(),
        silhouette.mesh().face_count(),
        silhouette.mesh().volume() * 1000.0
    );
    for entry in &silhouette.measurements().entries {
        println!(
            "  {:<8} z = {:+.2} m  surface {:.1} cm  indicator {:.1} cm",
            entry.kind.to_string(),
            entry.z,
            entry.mesh_circumference_m * 100.0,
            entry.indicator_circumference_m * 100.0
        );
    }

    let path = std::env::temp_dir().join(export_file_name("Demo"));
    silhouette.export_obj(&path)?;
    println!();
    println!("Exported {}", path.display());

    Ok(())
}
