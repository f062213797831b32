//! Write a synthetic earthquake catalog with the source (Turkish) headers.
//!
//! A few rows are deliberately dirty (outside the bounding box, negative
//! depth, wrong date template, missing location) so the cleaning pipeline
//! has something to do.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

use quake_atlas::sample::SimpleRng;

#[derive(Parser)]
#[command(name = "generate-catalog", about = "Write a synthetic earthquake catalog")]
struct Cli {
    /// Output file; `.csv` or `.parquet`
    #[arg(short, long, default_value = "sample_catalog.csv")]
    output: PathBuf,

    /// Number of events
    #[arg(short, long, default_value = "5000")]
    rows: usize,

    #[arg(long, default_value = "42")]
    seed: u64,
}

/// Location text, epicentre, spread (deg) and typical depth (km).
const SOURCES: [(&str, f64, f64, f64, f64); 10] = [
    ("VAN (ERCIS)", 38.95, 43.35, 0.3, 12.0),
    ("MALATYA-DOGANYOL", 38.32, 39.27, 0.25, 9.0),
    ("HAKKARI YUKSEKOVA", 37.57, 44.28, 0.2, 15.0),
    ("ELAZIG (SIVRICE)", 38.45, 39.30, 0.2, 8.0),
    ("PAZARCIK (KAHRAMANMARAS)", 37.22, 37.05, 0.4, 10.0),
    ("EGE DENIZI - MIDILLI ADASI", 38.90, 26.20, 0.35, 14.0),
    ("AKDENIZ - GIRIT ADASI", 35.40, 26.50, 0.4, 60.0),
    ("IZMIR (SEFERIHISAR)", 38.20, 26.84, 0.2, 11.0),
    ("DUZCE MERKEZ", 40.82, 31.16, 0.2, 10.0),
    ("SINDIRGI (BALIKESIR)", 39.24, 28.17, 0.15, 7.0),
];

struct Row {
    date: String,
    time: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    depth: Option<f64>,
    magnitude: f64,
    kind: &'static str,
    location: Option<&'static str>,
}

fn generate(rows: usize, rng: &mut SimpleRng) -> Vec<Row> {
    (0..rows)
        .map(|_| {
            let (place, lat, lon, spread, depth) = SOURCES[rng.below(SOURCES.len())];
            let year = 1915 + rng.below(110) as i32;
            let month = 1 + rng.below(12);
            let day = 1 + rng.below(28);

            // Gutenberg–Richter-ish: many small events, few large ones.
            let magnitude = (3.0 - 0.6 * (1.0 - rng.next_f64()).max(1e-9).ln()).min(8.0);

            let mut row = Row {
                date: format!("{year:04}.{month:02}.{day:02}"),
                time: format!(
                    "{:02}:{:02}:{:02}.{:02}",
                    rng.below(24),
                    rng.below(60),
                    rng.below(60),
                    rng.below(100)
                ),
                latitude: Some(rng.gauss(lat, spread)),
                longitude: Some(rng.gauss(lon, spread)),
                depth: Some(rng.gauss(depth, depth * 0.4).abs()),
                magnitude: (magnitude * 10.0).round() / 10.0,
                kind: "Ke",
                location: Some(place),
            };

            match rng.below(100) {
                0 | 1 => row.latitude = Some(47.0 + rng.next_f64()),
                2 => row.depth = Some(-1.0),
                3 => row.date = format!("{day:02}-{month:02}-{year:04}"),
                4 | 5 => row.location = None,
                6 => row.longitude = None,
                _ => {}
            }
            row
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record([
        "No",
        "Olus tarihi",
        "Olus zamani",
        "Enlem",
        "Boylam",
        "Derinlik",
        "xM",
        "Tip",
        "Yer",
    ])?;
    let opt = |v: Option<f64>| v.map(|v| format!("{v:.2}")).unwrap_or_default();
    for (i, r) in rows.iter().enumerate() {
        writer.write_record([
            (i + 1).to_string(),
            r.date.clone(),
            r.time.clone(),
            opt(r.latitude),
            opt(r.longitude),
            opt(r.depth),
            format!("{:.1}", r.magnitude),
            r.kind.to_string(),
            r.location.unwrap_or_default().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("No", DataType::Int64, false),
        Field::new("Olus tarihi", DataType::Utf8, false),
        Field::new("Olus zamani", DataType::Utf8, false),
        Field::new("Enlem", DataType::Float64, true),
        Field::new("Boylam", DataType::Float64, true),
        Field::new("Derinlik", DataType::Float64, true),
        Field::new("xM", DataType::Float64, false),
        Field::new("Tip", DataType::Utf8, false),
        Field::new("Yer", DataType::Utf8, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(1..=rows.len() as i64)),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.date.as_str()))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.time.as_str()))),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.latitude).collect::<Vec<_>>())),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.longitude).collect::<Vec<_>>())),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.depth).collect::<Vec<_>>())),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.magnitude))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.kind))),
        Arc::new(StringArray::from(rows.iter().map(|r| r.location).collect::<Vec<_>>())),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = SimpleRng::new(cli.seed);
    let rows = generate(cli.rows, &mut rng);

    let ext = cli
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&cli.output, &rows)?,
        "parquet" | "pq" => write_parquet(&cli.output, &rows)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    println!("Wrote {} events to {}", rows.len(), cli.output.display());
    Ok(())
}
