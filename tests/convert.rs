use std::fs;
use std::path::{Path, PathBuf};

use svgbatch::{collect_tasks, convert_dir, ConversionTask, Options};

const SVG_DATA: &str = "<svg xmlns='http://www.w3.org/2000/svg'/>";

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), SVG_DATA).unwrap();
}

#[test]
fn filters_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "a.svg");
    touch(dir.path(), "B.SVG");
    touch(dir.path(), "note.txt");

    let tasks = collect_tasks(dir.path(), 600).unwrap();
    let names: Vec<_> = tasks
        .iter()
        .map(|t| t.svg_path().file_name().unwrap().to_str().unwrap())
        .collect();

    assert_eq!(names, vec!["B.SVG", "a.svg"]);
}

#[test]
fn skips_directories() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("fake.svg")).unwrap();
    touch(dir.path(), "real.svg");

    let tasks = collect_tasks(dir.path(), 600).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].svg_path().file_name().unwrap(), "real.svg");
}

#[test]
fn derives_sibling_png_paths() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "drawing.svg");
    touch(dir.path(), "a.svg.backup.svg");

    let tasks = collect_tasks(dir.path(), 600).unwrap();
    let names: Vec<_> = tasks
        .iter()
        .map(|t| t.png_path().file_name().unwrap().to_str().unwrap())
        .collect();

    assert_eq!(names, vec!["a_png.png.backup.svg", "drawing_png.png"]);

    for task in &tasks {
        assert_eq!(task.png_path().parent(), task.svg_path().parent());
    }
}

#[test]
fn passes_dpi_to_every_invocation() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "a.svg");
    touch(dir.path(), "b.svg");

    let tasks = collect_tasks(dir.path(), 300).unwrap();
    assert_eq!(tasks.len(), 2);

    for task in &tasks {
        let cmd = task.command("inkscape");
        let dpi_arg = std::ffi::OsString::from("--export-dpi=300");
        assert!(cmd.get_args().any(|a| a == dpi_arg));
    }
}

#[test]
fn empty_directory_converts_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let n = convert_dir(dir.path(), &Options::default()).unwrap();
    assert_eq!(n, 0);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    assert!(collect_tasks(&missing, 600).is_err());
    assert!(convert_dir(&missing, &Options::default()).is_err());
}

#[test]
fn missing_rasterizer_does_not_propagate() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "a.svg");

    let opt = Options {
        rasterizer: "svgbatch-no-such-tool".to_string(),
        ..Options::default()
    };

    let n = convert_dir(dir.path(), &opt).unwrap();
    assert_eq!(n, 1);
    assert!(!dir.path().join("a_png.png").exists());
}

#[test]
fn run_reports_spawn_failure() {
    let task = ConversionTask::new(PathBuf::from("a.svg"), 600).unwrap();
    assert!(task.run("svgbatch-no-such-tool").is_err());
}
