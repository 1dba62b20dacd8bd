use chrono::NaiveDate;
use movie_core::error::MovieError;
use movie_data::analysis::analyze;
use movie_data::reader::load_movies;
use movie_report::{console, markdown, spreadsheet};
use tempfile::TempDir;

fn dataset() -> serde_json::Value {
    serde_json::json!([
        { "title": "Tumbbad", "year": 2018, "rating": 8.2, "votes": 60000, "duration": "1h 44m" },
        { "title": "Jai Bhim", "year": 2021, "rating": 8.8, "votes": 210000, "duration": 164 },
        { "title": "Black Friday", "year": 2004, "rating": 8.4, "votes": 22000 },
        { "title": "Dangal", "year": 2016, "rating": 8.3, "votes": 1250000, "duration": "161 min" },
        { "title": "Drishyam", "year": 2013, "rating": 8.2, "votes": 95000, "rank": 4 }
    ])
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[test]
fn test_dataset_to_reports() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("movies.json");
    std::fs::write(&data, serde_json::to_string_pretty(&dataset()).unwrap()).unwrap();

    let movies = load_movies(&data).unwrap();
    let ranks: Vec<(u32, &str)> = movies.iter().map(|m| (m.rank, m.title.as_str())).collect();
    assert_eq!(
        ranks,
        vec![
            (1, "Jai Bhim"),
            (2, "Black Friday"),
            (3, "Dangal"),
            (4, "Drishyam"),
            (5, "Tumbbad"),
        ]
    );

    let analysis = analyze(&movies, 10).unwrap();
    assert_eq!(analysis.summary.total_movies, 5);
    assert_eq!(analysis.summary.most_voted_movie, "Dangal");

    let readme = dir.path().join("README.md");
    markdown::write_report(&readme, &movies, &analysis, date()).unwrap();
    let text = std::fs::read_to_string(&readme).unwrap();
    assert!(text.contains("**Generated on:** June 01, 2025"));
    assert!(text.contains("| 5 | Tumbbad | 2018 | 8.2/10 | 60,000 | 1h 44m |"));
    assert!(text.contains("| 2 | Black Friday | 2004 | 8.4/10 | 22,000 | - |"));

    let workbook = dir.path().join("report.xlsx");
    spreadsheet::write_workbook(&workbook, &movies, &analysis, date()).unwrap();
    let bytes = std::fs::read(&workbook).unwrap();
    assert_eq!(&bytes[..2], b"PK");

    let console_text = console::render_analysis(&movies, &analysis);
    assert!(console_text.contains("Total movies analyzed: 5"));
}

#[test]
fn test_summary_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("movies.json");
    std::fs::write(&data, dataset().to_string()).unwrap();

    let first = analyze(&load_movies(&data).unwrap(), 10).unwrap();
    let second = analyze(&load_movies(&data).unwrap(), 10).unwrap();
    assert_eq!(
        serde_json::to_string_pretty(&first.summary).unwrap(),
        serde_json::to_string_pretty(&second.summary).unwrap()
    );
}

#[test]
fn test_missing_field_stops_before_output() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("movies.json");
    let broken = serde_json::json!([
        { "title": "Jai Bhim", "year": 2021, "rating": 8.8, "votes": 210000 },
        { "title": "Dangal", "year": 2016, "votes": 1250000 }
    ]);
    std::fs::write(&data, broken.to_string()).unwrap();

    let err = load_movies(&data).unwrap_err();
    match &err {
        MovieError::Parse(msg) => {
            assert!(msg.contains("#1"), "{msg}");
            assert!(msg.contains("rating"), "{msg}");
        }
        other => panic!("expected Parse, got {other:?}"),
    }
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
