//! End-to-end tests for the render, inspect and sweep commands.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;

use flextab_cli::cli::{Cli, Command};
use flextab_cli::commands::{read_table, run_inspect, run_render, run_sweep};
use flextab_cli::config::ReportConfig;
use flextab_report::ReportFormat;

const RESULTS: &str = "ID,acc,f1,task\n\
                       run2,0.9,0.7,org.example.task.Eval\n\
                       run1,0.9,0.8123,org.example.task.Eval\n";

fn write_input(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("results.csv");
    fs::write(&path, RESULTS).unwrap();
    path
}

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["flextab"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn render_wiki_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("out/report.txt");
    let cli = parse(&[
        "render",
        path_str(&input),
        "--format",
        "wiki",
        "--output",
        path_str(&output),
    ]);
    let Command::Render(args) = &cli.command else {
        panic!("expected render");
    };

    let outcome = run_render(args, &ReportConfig::default()).unwrap();
    assert_eq!(outcome.format, ReportFormat::Wiki);
    assert_eq!(outcome.rows, 2);
    assert_eq!(outcome.columns, 3);
    assert_eq!(outcome.invariant_columns, 2);

    insta::assert_snapshot!(fs::read_to_string(&output).unwrap(), @r"
    | *acc* | 0.9 |
    | *task* | org.example.task.Eval |


    | *ID* | *f1* |
    | !run1 | 0.8123 |
    | !run2 | 0.7 |
    ");
}

#[test]
fn render_latex_uses_config_file_and_flags() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("report.tex");
    let config_path = dir.path().join("flextab.toml");
    fs::write(
        &config_path,
        "[latex]\ndecimal_places = 2\nalignment = \"r\"\n",
    )
    .unwrap();

    let cli = parse(&[
        "--config",
        path_str(&config_path),
        "render",
        path_str(&input),
        "--format",
        "latex",
        "--output",
        path_str(&output),
        "--decimal-places",
        "1",
    ]);
    let config = ReportConfig::load_or_default(cli.config.as_deref()).unwrap();
    let Command::Render(args) = &cli.command else {
        panic!("expected render");
    };
    run_render(args, &config).unwrap();

    insta::assert_snapshot!(fs::read_to_string(&output).unwrap(), @r"
    \begin{tabular}{ l r r r }
    \small
    \hline
    ID & acc & f1 & task\\
    run1 & 0.9 & 0.8 & org.example.task.Eval\\
    run2 & 0.9 & 0.7 & org.example.task.Eval\\
    \hline
    \end{tabular}
    ");
}

#[test]
fn render_csv_keeps_input_order_without_sorting() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("copy.csv");
    let cli = parse(&[
        "render",
        path_str(&input),
        "--no-sort",
        "--output",
        path_str(&output),
    ]);
    let Command::Render(args) = &cli.command else {
        panic!("expected render");
    };
    run_render(args, &ReportConfig::default()).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), RESULTS);
}

#[test]
fn render_reports_missing_input() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.csv");
    let cli = parse(&["render", path_str(&missing)]);
    let Command::Render(args) = &cli.command else {
        panic!("expected render");
    };
    let err = run_render(args, &ReportConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("missing.csv"));
}

#[test]
fn inspect_reports_partition() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let cli = parse(&["inspect", path_str(&input)]);
    let Command::Inspect(args) = &cli.command else {
        panic!("expected inspect");
    };
    let report = run_inspect(args, &ReportConfig::default()).unwrap();

    assert_eq!(report.rows, 2);
    assert_eq!(report.invariant_count(), 2);
    let varying: Vec<&str> = report
        .columns
        .iter()
        .filter(|c| !c.invariant)
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(varying, ["f1"]);
}

#[test]
fn sweep_renders_every_configuration() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("sweep.csv");
    let cli = parse(&[
        "sweep",
        "--dim",
        "model=svm,nb",
        "--dim",
        "lr=0.1,0.01",
        "--output",
        path_str(&output),
    ]);
    let Command::Sweep(args) = &cli.command else {
        panic!("expected sweep");
    };
    let outcome = run_sweep(args, &ReportConfig::default()).unwrap();
    assert_eq!(outcome.rows, 4);

    let table = read_table(&output).unwrap();
    assert_eq!(table.column_ids(), ["lr", "model"]);
    assert_eq!(
        table.row_ids(),
        [
            "lr=0.01,model=nb",
            "lr=0.01,model=svm",
            "lr=0.1,model=nb",
            "lr=0.1,model=svm"
        ]
    );
}

#[test]
fn sweep_rejects_duplicate_dimensions() {
    let cli = parse(&["sweep", "--dim", "a=1", "--dim", "a=2"]);
    let Command::Sweep(args) = &cli.command else {
        panic!("expected sweep");
    };
    let err = run_sweep(args, &ReportConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("dimension [a] is already part of the parameter space"));
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("bad.toml");
    fs::write(&config_path, "[table]\ncompact = \"yes\"\n").unwrap();
    let err = ReportConfig::load(&config_path).unwrap_err();
    assert!(format!("{err:#}").contains("bad.toml"));
}
