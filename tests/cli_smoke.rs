use std::path::PathBuf;
use std::process::Command;

fn write_fixtures(dir: &std::path::Path) -> PathBuf {
    let config = r##"{
        "dataSources": {
            "sample": {
                "title": "Sample ({date})",
                "file": "sample.csv",
                "series": [
                    { "name": "Alpha", "code": "AL", "color": "#e4572e" }
                ]
            }
        },
        "colorSchemas": {
            "default": {
                "background": "#18181c",
                "lineStroke": { "width": 3.0 },
                "scale": {
                    "lineColor": "#888888",
                    "lineWidth": 1.0,
                    "axisFont": { "family": "sans-serif", "size": 14.0, "color": "#aaaaaa" }
                },
                "title": { "family": "sans-serif", "size": 22.0, "color": "#ffffff" },
                "date": { "family": "monospace", "size": 18.0, "color": "#cccccc" },
                "seriesLabel": {
                    "font": { "family": "sans-serif", "size": 13.0, "color": "#ffffff" },
                    "offset": [8.0, -8.0]
                },
                "timebar": { "color": "#3f88c5" },
                "watermark": {
                    "text": "cl",
                    "font": { "family": "sans-serif", "size": 11.0, "color": "#555555" }
                }
            }
        },
        "layouts": {
            "square": {
                "canvasSize": { "width": 320, "height": 320 },
                "plotArea": { "left": 40.0, "right": 300.0, "top": 30.0, "bottom": 280.0 },
                "circleSize": 4.0,
                "datePosition": [220.0, 20.0],
                "timebar": { "height": 6.0 }
            }
        },
        "defaults": { "source": "sample", "frames": 2, "extraFrames": 1 }
    }"##;
    let csv = "series,date,value\n\
        Alpha,2020-04-01,10\n\
        Alpha,2020-04-02,25\n\
        Alpha,2020-04-03,60\n";

    std::fs::write(dir.join("config.json"), config).unwrap();
    std::fs::write(dir.join("sample.csv"), csv).unwrap();
    dir.join("config.json")
}

#[test]
fn cli_renders_ordered_svg_frames() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_fixtures(dir.path());
    let out = dir.path().join("frames");

    let status = Command::new(env!("CARGO_BIN_EXE_chartlapse"))
        .arg("--config")
        .arg(&config_path)
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    // 1 + 2*2 reveal frames plus 1 hold frame.
    for i in 0..6 {
        assert!(
            out.join(format!("frame_{i:05}.svg")).exists(),
            "missing frame {i}"
        );
    }
    assert!(!out.join("frame_00006.svg").exists());

    let first = std::fs::read_to_string(out.join("frame_00000.svg")).unwrap();
    assert!(first.contains("<svg"));
    assert!(first.contains("2020-04-01"));
    // Title placeholder expanded to the last data date.
    assert!(first.contains("Sample (2020-04-03)"));
}

#[test]
fn cli_fails_with_descriptive_error_for_unknown_source() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_fixtures(dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_chartlapse"))
        .arg("--config")
        .arg(&config_path)
        .arg("--source")
        .arg("nope")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("data source not found: nope"));
}
