//! Validates CSV loading, coordinate round-tripping, CLI parsing, and plots

use clap::Parser;
use pointcorr::AnalysisError;
use pointcorr::io::cli::Cli;
use pointcorr::io::dataset::{load_domain, write_coordinates};
use pointcorr::io::plot::{PlotConfig, render_scatter};
use std::io::Write;
use std::path::PathBuf;

fn write_csv(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let Ok(dir) = tempfile::tempdir() else {
        unreachable!("temp directory must be creatable")
    };
    let path = dir.path().join("cells.csv");
    let Ok(mut file) = std::fs::File::create(&path) else {
        unreachable!("temp file must be creatable")
    };
    let Ok(()) = file.write_all(contents.as_bytes()) else {
        unreachable!("temp file must be writable")
    };
    (dir, path)
}

#[test]
fn test_load_domain_with_markers() {
    let (_dir, path) = write_csv(
        "x,y,Cell type,CD3,notes\n\
         1.5,2.25,Tumour,0.8,first\n\
         10.0,20.0,Stroma,0.1,second\n\
         3.125,4.75,Tumour,0.5,third\n",
    );

    let Ok(domain) = load_domain(&path) else {
        unreachable!("well-formed CSV must load")
    };

    assert_eq!(domain.name(), "cells");
    assert_eq!(domain.points().len(), 3);
    assert_eq!(domain.points().get(1), Some([10.0, 20.0]));

    let Ok(cell_type) = domain.categorical("Cell type") else {
        unreachable!("cell type column must attach")
    };
    assert_eq!(cell_type.levels(), ["Stroma", "Tumour"]);

    // Numeric extra column becomes a continuous marker
    let Ok(marker) = domain.continuous("CD3") else {
        unreachable!("numeric column must attach")
    };
    assert_eq!(marker.values(), [0.8, 0.1, 0.5]);

    // Non-numeric extra column is skipped
    assert!(domain.label("notes").is_none());
}

#[test]
fn test_missing_required_column_names_the_column() {
    let (_dir, path) = write_csv("x,y,phenotype\n1.0,2.0,Tumour\n");

    let result = load_domain(&path);
    match result {
        Err(AnalysisError::DataFormat { column, .. }) => assert_eq!(column, "Cell type"),
        _ => unreachable!("expected a DataFormat error for the missing column"),
    }
}

#[test]
fn test_malformed_coordinate_names_the_column() {
    let (_dir, path) = write_csv("x,y,Cell type\n1.0,not-a-number,Tumour\n");

    let result = load_domain(&path);
    match result {
        Err(AnalysisError::DataFormat { column, .. }) => assert_eq!(column, "y"),
        _ => unreachable!("expected a DataFormat error for the malformed value"),
    }
}

#[test]
fn test_coordinate_round_trip_is_exact() {
    let (_dir, path) = write_csv(
        "x,y,Cell type\n\
         0.1,0.30000000000000004,Tumour\n\
         123.456,789.012,Stroma\n\
         1e-12,5.5,Tumour\n\
         42.0,0.125,Stroma\n",
    );

    let Ok(original) = load_domain(&path) else {
        unreachable!("well-formed CSV must load")
    };

    let rewritten = path.with_file_name("rewritten.csv");
    let Ok(()) = write_coordinates(&original, &rewritten) else {
        unreachable!("coordinates must serialize")
    };

    // Reload with a synthetic type column appended for the loader
    let Ok(contents) = std::fs::read_to_string(&rewritten) else {
        unreachable!("rewritten file must be readable")
    };
    let with_types: String = contents
        .lines()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 {
                format!("{line},Cell type\n")
            } else {
                format!("{line},t\n")
            }
        })
        .collect();
    let (_dir2, reload_path) = write_csv(&with_types);

    let Ok(reloaded) = load_domain(&reload_path) else {
        unreachable!("rewritten CSV must load")
    };

    assert_eq!(
        original.points().coordinates(),
        reloaded.points().coordinates()
    );
}

#[test]
fn test_quoted_fields_keep_embedded_commas() {
    let (_dir, path) = write_csv(
        "x,y,Cell type\n1.0,2.0,\"Tumour, invasive\"\n3.0,4.0,Stroma\n",
    );

    let Ok(domain) = load_domain(&path) else {
        unreachable!("quoted CSV must load")
    };
    let Ok(cell_type) = domain.categorical("Cell type") else {
        unreachable!("cell type column must attach")
    };
    assert_eq!(cell_type.levels(), ["Stroma", "Tumour, invasive"]);
}

#[test]
fn test_cli_parses_defaults_and_overrides() {
    let Ok(cli) = Cli::try_parse_from(["pointcorr", "data.csv", "--seed", "7", "--pcf-from", "Tumour"])
    else {
        unreachable!("valid arguments must parse")
    };

    assert_eq!(cli.target, PathBuf::from("data.csv"));
    assert_eq!(cli.seed, 7);
    assert_eq!(cli.label, "Cell type");
    assert_eq!(cli.pcf_from.as_deref(), Some("Tumour"));
    assert!(cli.pcf_to.is_none());
    assert!(cli.skip_existing());
}

#[test]
fn test_render_scatter_dimensions_follow_boundary_aspect() {
    let (_dir, path) = write_csv(
        "x,y,Cell type\n0.0,0.0,a\n100.0,50.0,b\n20.0,30.0,a\n80.0,10.0,b\n",
    );
    let Ok(domain) = load_domain(&path) else {
        unreachable!("well-formed CSV must load")
    };

    let config = PlotConfig::default();
    let Ok(img) = render_scatter(&domain, "Cell type", &config) else {
        unreachable!("plot must render")
    };

    assert_eq!(img.width(), config.width);
    // Boundary is twice as wide as tall, so the drawable area halves
    let drawable = config.width - 40;
    assert_eq!(img.height(), drawable / 2 + 40);

    assert!(render_scatter(&domain, "missing", &config).is_err());
}
