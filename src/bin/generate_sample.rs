use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One row of the generated sheet, serialized with the spreadsheet headers.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "Station Name")]
    station: &'static str,
    #[serde(rename = "Prefecture")]
    prefecture: &'static str,
    #[serde(rename = "Company")]
    company: &'static str,
    #[serde(rename = "Shinkansen_Line")]
    line: &'static str,
    #[serde(rename = "Year")]
    year: i64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Distance from Tokyo Station")]
    distance: f64,
}

const fn row(
    station: &'static str,
    prefecture: &'static str,
    company: &'static str,
    line: &'static str,
    year: i64,
    longitude: f64,
    latitude: f64,
    distance: f64,
) -> Row {
    Row {
        station,
        prefecture,
        company,
        line,
        year,
        longitude,
        latitude,
        distance,
    }
}

const TOKAIDO: &str = "Tokaido Shinkansen";
const SANYO: &str = "Sanyo Shinkansen";
const TOHOKU: &str = "Tohoku Shinkansen";
const JOETSU: &str = "Joetsu Shinkansen";
const HOKURIKU: &str = "Hokuriku Shinkansen";
const KYUSHU: &str = "Kyushu Shinkansen";
const HOKKAIDO: &str = "Hokkaido Shinkansen";

/// A representative subset of real stations (approximate coordinates).
const STATIONS: &[Row] = &[
    row("Tokyo", "Tokyo", "JR Central", TOKAIDO, 1964, 139.7671, 35.6812, 0.0),
    row("Shinagawa", "Tokyo", "JR Central", TOKAIDO, 2003, 139.7387, 35.6285, 6.8),
    row("Shin-Yokohama", "Kanagawa", "JR Central", TOKAIDO, 1964, 139.6173, 35.5066, 28.8),
    row("Odawara", "Kanagawa", "JR Central", TOKAIDO, 1964, 139.1553, 35.2564, 83.9),
    row("Atami", "Shizuoka", "JR Central", TOKAIDO, 1964, 139.0775, 35.1039, 104.6),
    row("Shizuoka", "Shizuoka", "JR Central", TOKAIDO, 1964, 138.3890, 34.9719, 180.2),
    row("Hamamatsu", "Shizuoka", "JR Central", TOKAIDO, 1964, 137.7345, 34.7038, 257.1),
    row("Toyohashi", "Aichi", "JR Central", TOKAIDO, 1964, 137.3817, 34.7629, 293.6),
    row("Mikawa-Anjo", "Aichi", "JR Central", TOKAIDO, 1988, 137.0650, 34.9597, 336.3),
    row("Nagoya", "Aichi", "JR Central", TOKAIDO, 1964, 136.8816, 35.1709, 366.0),
    row("Gifu-Hashima", "Gifu", "JR Central", TOKAIDO, 1964, 136.6867, 35.3161, 396.3),
    row("Maibara", "Shiga", "JR Central", TOKAIDO, 1964, 136.2906, 35.3142, 445.9),
    row("Kyoto", "Kyoto", "JR Central", TOKAIDO, 1964, 135.7585, 34.9858, 513.6),
    row("Shin-Osaka", "Osaka", "JR Central", TOKAIDO, 1964, 135.5001, 34.7335, 552.6),
    row("Shin-Kobe", "Hyogo", "JR West", SANYO, 1972, 135.1953, 34.7063, 589.5),
    row("Himeji", "Hyogo", "JR West", SANYO, 1972, 134.6907, 34.8268, 644.3),
    row("Okayama", "Okayama", "JR West", SANYO, 1972, 133.9181, 34.6661, 732.9),
    row("Fukuyama", "Hiroshima", "JR West", SANYO, 1975, 133.3627, 34.4894, 791.2),
    row("Hiroshima", "Hiroshima", "JR West", SANYO, 1975, 132.4753, 34.3975, 894.2),
    row("Shin-Yamaguchi", "Yamaguchi", "JR West", SANYO, 1975, 131.3965, 34.0939, 1027.0),
    row("Kokura", "Fukuoka", "JR West", SANYO, 1975, 130.8825, 33.8866, 1107.7),
    row("Hakata", "Fukuoka", "JR West", SANYO, 1975, 130.4206, 33.5897, 1174.9),
    row("Kumamoto", "Kumamoto", "JR Kyushu", KYUSHU, 2011, 130.6889, 32.7894, 1293.5),
    row("Shin-Yatsushiro", "Kumamoto", "JR Kyushu", KYUSHU, 2004, 130.6547, 32.5085, 1326.3),
    row("Kagoshima-Chuo", "Kagoshima", "JR Kyushu", KYUSHU, 2004, 130.5413, 31.5838, 1463.6),
    row("Ueno", "Tokyo", "JR East", TOHOKU, 1985, 139.7774, 35.7138, 3.6),
    row("Omiya", "Saitama", "JR East", TOHOKU, 1982, 139.6237, 35.9063, 30.3),
    row("Utsunomiya", "Tochigi", "JR East", TOHOKU, 1982, 139.8985, 36.5591, 109.5),
    row("Koriyama", "Fukushima", "JR East", TOHOKU, 1982, 140.3887, 37.3981, 226.7),
    row("Fukushima", "Fukushima", "JR East", TOHOKU, 1982, 140.4572, 37.7541, 272.8),
    row("Sendai", "Miyagi", "JR East", TOHOKU, 1982, 140.8824, 38.2601, 351.8),
    row("Morioka", "Iwate", "JR East", TOHOKU, 1982, 141.1363, 39.7016, 535.3),
    row("Hachinohe", "Aomori", "JR East", TOHOKU, 2002, 141.4926, 40.5091, 631.9),
    row("Shin-Aomori", "Aomori", "JR East", TOHOKU, 2010, 140.6931, 40.8270, 713.7),
    row("Takasaki", "Gunma", "JR East", JOETSU, 1982, 139.0127, 36.3226, 105.0),
    row("Nagaoka", "Niigata", "JR East", JOETSU, 1982, 138.8510, 37.4474, 270.6),
    row("Niigata", "Niigata", "JR East", JOETSU, 1982, 139.0613, 37.9115, 333.9),
    row("Nagano", "Nagano", "JR East", HOKURIKU, 1997, 138.1889, 36.6435, 222.4),
    row("Toyama", "Toyama", "JR West", HOKURIKU, 2015, 137.2128, 36.7014, 391.9),
    row("Kanazawa", "Ishikawa", "JR West", HOKURIKU, 2015, 136.6483, 36.5780, 450.5),
    row("Okutsugaru-Imabetsu", "Aomori", "JR Hokkaido", HOKKAIDO, 2016, 140.5147, 41.1448, 752.6),
    row("Kikonai", "Hokkaido", "JR Hokkaido", HOKKAIDO, 2016, 140.4369, 41.6781, 823.7),
    row("Shin-Hakodate-Hokuto", "Hokkaido", "JR Hokkaido", HOKKAIDO, 2016, 140.6486, 41.9047, 862.5),
];

fn write_csv(path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for station in STATIONS {
        writer.serialize(station)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str) -> Result<()> {
    let text = |name: &str| Field::new(name, DataType::Utf8, false);
    let schema = Arc::new(Schema::new(vec![
        text("Station Name"),
        text("Prefecture"),
        text("Company"),
        text("Shinkansen_Line"),
        Field::new("Year", DataType::Int64, false),
        Field::new("Longitude", DataType::Float64, false),
        Field::new("Latitude", DataType::Float64, false),
        Field::new("Distance from Tokyo Station", DataType::Float64, false),
    ]));

    let strings = |f: fn(&Row) -> &'static str| -> ArrayRef {
        Arc::new(StringArray::from(STATIONS.iter().map(f).collect::<Vec<_>>()))
    };
    let floats = |f: fn(&Row) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(STATIONS.iter().map(f).collect::<Vec<_>>()))
    };

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            strings(|r| r.station),
            strings(|r| r.prefecture),
            strings(|r| r.company),
            strings(|r| r.line),
            Arc::new(Int64Array::from(STATIONS.iter().map(|r| r.year).collect::<Vec<_>>())),
            floats(|r| r.longitude),
            floats(|r| r.latitude),
            floats(|r| r.distance),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    write_csv("shinkansen.csv")?;
    log::info!("Wrote {} stations to shinkansen.csv", STATIONS.len());

    write_parquet("shinkansen.parquet")?;
    log::info!("Wrote {} stations to shinkansen.parquet", STATIONS.len());
    Ok(())
}
