//! Contract for the widget files consumed by the report renderer: names,
//! shapes, and the five-point trend invariant.

use std::fs;
use std::path::Path;

use gauntlet_core::config::PipelineConfig;
use gauntlet_core::model::AggregateCounts;
use gauntlet_core::report::{trends, widgets};

fn read_array(path: &Path) -> Vec<serde_json::Value> {
    let raw = fs::read_to_string(path).unwrap_or_else(|_| panic!("missing {}", path.display()));
    serde_json::from_str::<serde_json::Value>(&raw)
        .unwrap()
        .as_array()
        .expect("widget must be a JSON array")
        .clone()
}

#[test]
fn rich_report_widget_tree_has_expected_shapes() {
    let report_dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        port: 64678,
        ..PipelineConfig::default()
    };
    let counts = AggregateCounts {
        total: 35,
        passed: 26,
        failed: 9,
    };

    widgets::customize_report(report_dir.path(), &config).unwrap();
    trends::write_trend_widgets(report_dir.path(), counts).unwrap();

    let widgets_dir = report_dir.path().join("widgets");

    let executors = read_array(&widgets_dir.join("executors.json"));
    assert_eq!(executors.len(), 1);
    assert_eq!(executors[0]["buildOrder"], 1);
    assert_eq!(executors[0]["reportUrl"], "http://localhost:64678/index.html");

    let environment = read_array(&widgets_dir.join("environment.json"));
    assert!(environment.iter().all(|row| {
        row.get("name").is_some() && row.get("values").is_some_and(|v| v.is_array())
    }));

    for widget in [
        "history-trend.json",
        "categories-trend.json",
        "retry-trend.json",
        "duration-trend.json",
    ] {
        let points = read_array(&widgets_dir.join(widget));
        assert_eq!(points.len(), 5, "{widget} must have exactly 5 points");

        let orders: Vec<u64> = points
            .iter()
            .map(|p| p["buildOrder"].as_u64().unwrap())
            .collect();
        assert_eq!(orders, vec![5, 4, 3, 2, 1], "{widget} build order");

        assert!(
            points.iter().all(|p| p.get("data").is_some()),
            "{widget} points carry a data payload"
        );
    }

    // Current points reflect the real run.
    let history = read_array(&widgets_dir.join("history-trend.json"));
    assert_eq!(history[4]["data"]["failed"], 9);
    assert_eq!(history[4]["data"]["passed"], 26);
    assert_eq!(history[4]["data"]["total"], 35);

    let categories = read_array(&widgets_dir.join("categories-trend.json"));
    assert_eq!(categories[4]["data"]["Product defects"], 8);
    assert_eq!(categories[4]["data"]["Test defects"], 1);

    let retries = read_array(&widgets_dir.join("retry-trend.json"));
    assert_eq!(retries[4]["data"]["retry"], 2);
    assert_eq!(retries[4]["data"]["run"], 35);

    let duration = read_array(&widgets_dir.join("duration-trend.json"));
    assert_eq!(duration[4]["data"]["duration"], 11_350 + 9 * 200);
}
