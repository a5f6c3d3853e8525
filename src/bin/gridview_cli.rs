//! CLI tool for gridview - replays a scenario and outputs the skin state as JSON
//!
//! Usage:
//!   gridview_cli <scenario.json>              # Output JSON to stdout
//!   gridview_cli <scenario.json> -o out.json  # Output JSON to file
//!   gridview_cli <scenario.json> -v           # Debug logging on stderr

#![allow(clippy::exit)]

use std::env;
use std::fs;
use std::io::{self, Write};

use serde::Deserialize;
use simplelog::{Config, LevelFilter, WriteLogger};

use gridview::{
    CellValue, ColumnId, Columns, FocusedCell, GridConfig, GridEvent, GridFlow, GridModel,
    GridSkin, LeafColumn, Rect, SampleLimit, Selection, SkinSnapshot, TextCellFactory,
    DEFAULT_COLUMN_WIDTH,
};

#[derive(Debug, Deserialize)]
struct CellEntry {
    row: usize,
    column: ColumnId,
    value: CellValue,
}

/// One step of a scenario
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Action {
    FixRows { rows: Vec<usize> },
    FixRow { row: usize },
    UnfixRow { row: usize },
    FixColumns { columns: Vec<ColumnId> },
    Focus { row: usize, column: ColumnId },
    FocusNext,
    FocusPrevious,
    SelectNext,
    SelectPrevious,
    Select { selection: Selection },
    ScrollVertical { value: f64 },
    ScrollToColumn { column: ColumnId },
    SetRowHeight { row: usize, height: f64 },
    Autosize {
        column: ColumnId,
        #[serde(default)]
        sample_limit: Option<SampleLimit>,
    },
    Resize { bounds: Rect },
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Scenario {
    config: GridConfig,
    bounds: Rect,
    row_count: usize,
    column_widths: Vec<f64>,
    row_heights: Vec<(usize, f64)>,
    cells: Vec<CellEntry>,
    glyph_width: f64,
    actions: Vec<Action>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            config: GridConfig::default(),
            bounds: Rect::new(0.0, 0.0, 800.0, 600.0),
            row_count: 100,
            column_widths: vec![DEFAULT_COLUMN_WIDTH; 10],
            row_heights: Vec::new(),
            cells: Vec::new(),
            glyph_width: gridview::autosize::DEFAULT_GLYPH_WIDTH,
            actions: Vec::new(),
        }
    }
}

fn load(path: &str) -> gridview::Result<Scenario> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn write_output(path: Option<&str>, json: &str) -> gridview::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, json)?;
            eprintln!("Written: {path}");
        }
        None => writeln!(io::stdout(), "{json}")?,
    }
    Ok(())
}

fn run(scenario: Scenario) -> gridview::Result<SkinSnapshot> {
    let column_count = scenario.column_widths.len();
    let mut grid = GridModel::blank(
        scenario.row_count,
        column_count,
        scenario.config.default_cell_height,
    );
    for entry in scenario.cells {
        if !grid.set_value(entry.row, entry.column, entry.value) {
            log::warn!("cell ({}, {}) is outside the grid", entry.row, entry.column);
        }
    }
    for (row, height) in scenario.row_heights {
        grid.set_row_height(row, height);
    }
    let columns = Columns::new(
        scenario
            .column_widths
            .iter()
            .enumerate()
            .map(|(i, width)| LeafColumn::new(i, *width))
            .collect(),
    );

    let mut skin = GridSkin::new(
        scenario.config,
        grid,
        columns,
        GridFlow::new(scenario.bounds.width, scenario.bounds.height),
    )
    .with_cell_factory(TextCellFactory::new(scenario.glyph_width));
    skin.handle(GridEvent::Layout(scenario.bounds));

    for action in scenario.actions {
        log::debug!("{action:?}");
        match action {
            Action::FixRows { rows } => {
                skin.set_fixed_rows(rows)?;
            }
            Action::FixRow { row } => {
                skin.fix_row(row)?;
            }
            Action::UnfixRow { row } => {
                skin.unfix_row(row)?;
            }
            Action::FixColumns { columns } => skin.set_fixed_columns(&columns)?,
            Action::Focus { row, column } => {
                skin.set_focus_model(Some(Box::new(FocusedCell::at(row, column))));
            }
            Action::FocusNext => skin.handle(GridEvent::FocusNextCell),
            Action::FocusPrevious => skin.handle(GridEvent::FocusPreviousCell),
            Action::SelectNext => skin.handle(GridEvent::SelectNextCell),
            Action::SelectPrevious => skin.handle(GridEvent::SelectPreviousCell),
            Action::Select { selection } => skin.select(&selection),
            Action::ScrollVertical { value } => skin.handle(GridEvent::VerticalScroll(value)),
            Action::ScrollToColumn { column } => {
                skin.scroll_horizontally(column);
            }
            Action::SetRowHeight { row, height } => {
                skin.grid_mut().set_row_height(row, height);
                skin.handle(GridEvent::RowHeightsChanged);
            }
            Action::Autosize {
                column,
                sample_limit,
            } => {
                let limit = sample_limit.unwrap_or(skin.config().autosize_sample_limit);
                if skin.resize_column_to_fit_content(column, limit).is_none() {
                    log::info!("nothing to measure in {column}");
                }
            }
            Action::Resize { bounds } => skin.handle(GridEvent::Layout(bounds)),
        }
    }

    Ok(skin.snapshot())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut input_path = None;
    let mut output_path = None;
    let mut verbose = false;
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-o" => output_path = rest.next(),
            "-v" => verbose = true,
            _ => input_path = Some(arg),
        }
    }

    let Some(input_path) = input_path else {
        eprintln!("Usage: gridview_cli <scenario.json> [-o output.json] [-v]");
        std::process::exit(1);
    };

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = WriteLogger::init(level, Config::default(), io::stderr()) {
        eprintln!("Error initialising logger: {e}");
    }

    // Read scenario
    let scenario = match load(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading {input_path}: {e}");
            std::process::exit(1);
        }
    };

    let snapshot = match run(scenario) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error running scenario: {e}");
            std::process::exit(1);
        }
    };

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&snapshot) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {e}");
            std::process::exit(1);
        }
    };

    // Output
    if let Err(e) = write_output(output_path.map(String::as_str), &json) {
        eprintln!("Error writing output: {e}");
        std::process::exit(1);
    }
}
