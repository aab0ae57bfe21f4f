use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use clap::Parser;
use parquet::arrow::ArrowWriter;

/// Write deterministic sample trip files for every supported city.
#[derive(Parser, Debug)]
#[clap(name = "generate_sample", version)]
struct Args {
    /// Output directory (created if missing)
    #[clap(default_value = ".")]
    out_dir: PathBuf,

    /// Trips per city
    #[clap(long, default_value_t = 2000)]
    trips: usize,

    /// PRNG seed
    #[clap(long, default_value_t = 42)]
    seed: u64,

    /// Also write a .parquet file next to each .csv
    #[clap(long)]
    parquet: bool,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n.max(1)
    }

    /// Index drawn from relative `weights`.
    fn weighted(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut target = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if target < *w {
                return i;
            }
            target -= w;
        }
        weights.len() - 1
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct CityProfile {
    stem: &'static str,
    stations: &'static [&'static str],
    demographics: bool,
    /// Fractional seconds in durations, as in the Washington export.
    fractional_durations: bool,
}

const CITIES: [CityProfile; 3] = [
    CityProfile {
        stem: "chicago",
        stations: &[
            "Streeter Dr & Grand Ave",
            "Lake Shore Dr & Monroe St",
            "Clinton St & Washington Blvd",
            "Canal St & Adams St",
            "Theater on the Lake",
            "Michigan Ave & Oak St",
            "Wood St & Hubbard St",
        ],
        demographics: true,
        fractional_durations: false,
    },
    CityProfile {
        stem: "new_york_city",
        stations: &[
            "Pershing Square North",
            "E 17 St & Broadway",
            "W 21 St & 6 Ave",
            "West St & Chambers St",
            "Broadway & E 22 St",
            "12 Ave & W 40 St",
        ],
        demographics: true,
        fractional_durations: false,
    },
    CityProfile {
        stem: "washington",
        stations: &[
            "Columbus Circle / Union Station",
            "Lincoln Memorial",
            "Jefferson Dr & 14th St SW",
            "Massachusetts Ave & Dupont Circle NW",
            "15th & P St NW",
            "Smithsonian-National Mall / Jefferson Dr & 12th St SW",
        ],
        demographics: false,
        fractional_durations: true,
    },
];

/// Busier in summer months and commute hours.
const MONTH_WEIGHTS: [f64; 6] = [0.6, 0.7, 0.9, 1.1, 1.3, 1.6];
const HOUR_WEIGHTS: [f64; 24] = [
    0.1, 0.05, 0.05, 0.05, 0.1, 0.3, 0.8, 1.5, 1.8, 1.0, 0.8, 0.9, 1.0, 1.0, 1.0, 1.1, 1.5, 2.0,
    1.7, 1.1, 0.8, 0.6, 0.4, 0.2,
];
const USER_TYPES: [&str; 2] = ["Subscriber", "Customer"];
const GENDERS: [&str; 2] = ["Male", "Female"];

struct SampleTrip {
    start: NaiveDateTime,
    end: NaiveDateTime,
    duration: f64,
    start_station: &'static str,
    end_station: &'static str,
    user_type: &'static str,
    gender: Option<&'static str>,
    birth_year: Option<f64>,
}

fn generate_trip(city: &CityProfile, rng: &mut SimpleRng) -> Result<SampleTrip> {
    let month = rng.weighted(&MONTH_WEIGHTS) as u32 + 1;
    let days_in_month = match month {
        2 => 28,
        4 | 6 => 30,
        _ => 31,
    };
    let day = rng.below(days_in_month) as u32 + 1;
    let hour = rng.weighted(&HOUR_WEIGHTS) as u32;
    let minute = rng.below(60) as u32;
    let second = rng.below(60) as u32;
    let start = NaiveDate::from_ymd_opt(2017, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .with_context(|| format!("invalid sample date 2017-{month}-{day} {hour}:{minute}"))?;

    let mut duration = rng.gauss(900.0, 400.0).max(61.0);
    if !city.fractional_durations {
        duration = duration.round();
    }
    let end = start + Duration::milliseconds((duration * 1000.0) as i64);

    let n = city.stations.len() as u64;
    let start_station = city.stations[rng.below(n) as usize];
    let end_station = city.stations[rng.below(n) as usize];

    let customer = rng.next_f64() < 0.2;
    let user_type = USER_TYPES[customer as usize];

    // Customers rarely leave demographic details.
    let (gender, birth_year) = if city.demographics && !customer {
        let gender = GENDERS[rng.below(2) as usize];
        let year = rng.gauss(1982.0, 11.0).clamp(1930.0, 2001.0).round();
        (Some(gender), Some(year))
    } else {
        (None, None)
    };

    Ok(SampleTrip {
        start,
        end,
        duration,
        start_station,
        end_station,
        user_type,
        gender,
        birth_year,
    })
}

fn write_csv(path: &Path, city: &CityProfile, trips: &[SampleTrip]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec![
        "",
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ];
    if city.demographics {
        header.extend(["Gender", "Birth Year"]);
    }
    writer.write_record(&header)?;

    for (i, trip) in trips.iter().enumerate() {
        let mut record = vec![
            i.to_string(),
            trip.start.format("%Y-%m-%d %H:%M:%S").to_string(),
            trip.end.format("%Y-%m-%d %H:%M:%S").to_string(),
            trip.duration.to_string(),
            trip.start_station.to_string(),
            trip.end_station.to_string(),
            trip.user_type.to_string(),
        ];
        if city.demographics {
            record.push(trip.gender.unwrap_or_default().to_string());
            record.push(trip.birth_year.map(|y| format!("{y:.1}")).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn text(trips: &[SampleTrip], cell: impl Fn(&SampleTrip) -> String) -> ArrayRef {
    Arc::new(StringArray::from(trips.iter().map(cell).collect::<Vec<_>>()))
}

fn write_parquet(path: &Path, city: &CityProfile, trips: &[SampleTrip]) -> Result<()> {
    let mut fields = vec![
        Field::new("Start Time", DataType::Utf8, false),
        Field::new("End Time", DataType::Utf8, false),
        Field::new("Trip Duration", DataType::Float64, false),
        Field::new("Start Station", DataType::Utf8, false),
        Field::new("End Station", DataType::Utf8, false),
        Field::new("User Type", DataType::Utf8, false),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        text(trips, |t| t.start.format("%Y-%m-%d %H:%M:%S").to_string()),
        text(trips, |t| t.end.format("%Y-%m-%d %H:%M:%S").to_string()),
        Arc::new(Float64Array::from_iter_values(trips.iter().map(|t| t.duration))) as ArrayRef,
        text(trips, |t| t.start_station.to_string()),
        text(trips, |t| t.end_station.to_string()),
        text(trips, |t| t.user_type.to_string()),
    ];
    if city.demographics {
        fields.push(Field::new("Gender", DataType::Utf8, true));
        fields.push(Field::new("Birth Year", DataType::Int64, true));
        columns.push(Arc::new(StringArray::from(
            trips.iter().map(|t| t.gender).collect::<Vec<_>>(),
        )));
        columns.push(Arc::new(Int64Array::from(
            trips
                .iter()
                .map(|t| t.birth_year.map(|y| y as i64))
                .collect::<Vec<_>>(),
        )));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

/// Write every city's sample file(s) into `out_dir`, returning the paths written.
fn generate(
    out_dir: &Path,
    trips_per_city: usize,
    seed: u64,
    parquet: bool,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(seed);
    let mut written = Vec::new();

    for city in &CITIES {
        let mut trips = (0..trips_per_city)
            .map(|_| generate_trip(city, &mut rng))
            .collect::<Result<Vec<_>>>()?;
        trips.sort_by_key(|t| t.start);

        let csv_path = out_dir.join(format!("{}.csv", city.stem));
        write_csv(&csv_path, city, &trips)?;
        written.push(csv_path);

        if parquet {
            let pq_path = out_dir.join(format!("{}.parquet", city.stem));
            write_parquet(&pq_path, city, &trips)?;
            written.push(pq_path);
        }
    }
    Ok(written)
}

fn main() -> Result<()> {
    let args = Args::parse();
    for path in generate(&args.out_dir, args.trips, args.seed, args.parquet)? {
        println!("Wrote {} trips to {}", args.trips, path.display());
    }
    Ok(())
}
