//! Loading and validation of puzzle configuration documents.
//!
//! A puzzle is described by a JSON document naming two CSV tables (the
//! adjacency table and the spatial layout) plus the start occupancy and
//! the goal. Everything is validated here; the search engine receives
//! only finished values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashSet;
use serde::Deserialize;

use common::layout::Layout;
use common::search::{Goal, SearchMethod, SolutionScope};
use common::{Board, BoardState, Vertex};

use crate::tables;

const DEFAULT_DESCRIPTION: &str = "Generic Jump Puzzle Solution";

/// A fully validated puzzle, ready to hand to the search engine.
#[derive(Clone, Debug)]
pub struct Puzzle {
    pub description: String,
    pub board: Board,
    pub layout: Layout,
    pub start: BoardState,
    pub goal: Goal,
    pub method: SearchMethod,
    pub scope: SolutionScope,
}

/// The raw document, before any cross-field checks.
#[derive(Deserialize)]
struct Document {
    description: Option<String>,
    board: String,
    layout: String,
    start: Vec<i64>,
    finish: Option<Vec<i64>>,
    final_count: Option<i64>,
    method: Option<String>,
    scope: Option<String>,
}

/// Read a puzzle document and everything it references. File names in
/// the document resolve relative to the document's own directory when
/// they are not found as given.
pub fn load(path: &Path) -> Result<Puzzle> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading configuration file {}", path.display()))?;
    let document: Document = serde_json::from_str(&text)
        .with_context(|| format!("parsing configuration file {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    from_document(document, base)
}

fn from_document(document: Document, base: &Path) -> Result<Puzzle> {
    let description = document
        .description
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    let board_path = resolve(base, &document.board);
    let transitions = tables::read_adjacency(&board_path)?;
    let board = Board::from_transitions(&transitions)?;

    let layout_path = resolve(base, &document.layout);
    let points = tables::read_layout_points(&layout_path)?;
    if points.len() != board.holes() {
        bail!(
            "layout file {} places {} holes but the board has {}",
            layout_path.display(),
            points.len(),
            board.holes()
        );
    }
    let layout = Layout::from_points(points);

    let method = parse_method(document.method.as_deref())?;
    let scope = parse_scope(document.scope.as_deref())?;

    let start_pegs = check_hole_list("start", &document.start, board.holes())?;
    let start = BoardState::with_pegs(board.holes(), start_pegs.iter().copied());

    let finish = document
        .finish
        .as_deref()
        .map(|list| check_hole_list("finish", list, board.holes()))
        .transpose()?;

    let final_count = document
        .final_count
        .map(|count| {
            if count < 0 || count > board.holes() as i64 {
                bail!(
                    "final_count should be between 0 and {}, found {count}",
                    board.holes()
                );
            }
            Ok(count as u32)
        })
        .transpose()?;

    if let (Some(finish), Some(final_count)) = (&finish, final_count) {
        if finish.len() as u32 != final_count {
            bail!(
                "finish lists {} holes but final_count asks for {final_count}",
                finish.len()
            );
        }
    }

    // with neither field given, the goal is the mirror image of the start
    let goal = match (finish, final_count) {
        (Some(finish), _) => Goal::position(&board, &finish)?,
        (None, Some(count)) => Goal::count(count),
        (None, None) => Goal::Position(start.complement()),
    };

    Ok(Puzzle {
        description,
        board,
        layout,
        start,
        goal,
        method,
        scope,
    })
}

fn resolve(base: &Path, name: &str) -> PathBuf {
    let direct = PathBuf::from(name);
    if direct.is_file() {
        direct
    } else {
        base.join(name)
    }
}

fn parse_method(value: Option<&str>) -> Result<SearchMethod> {
    match value {
        None => Ok(SearchMethod::DepthFirst),
        Some(raw) => match raw.to_ascii_uppercase().as_str() {
            "DEPTH_FIRST" => Ok(SearchMethod::DepthFirst),
            "BREADTH_FIRST" => Ok(SearchMethod::BreadthFirst),
            other => bail!("expected method DEPTH_FIRST or BREADTH_FIRST, found {other}"),
        },
    }
}

fn parse_scope(value: Option<&str>) -> Result<SolutionScope> {
    match value {
        None => Ok(SolutionScope::Single),
        Some(raw) => match raw.to_ascii_uppercase().as_str() {
            "SINGLE" => Ok(SolutionScope::Single),
            "MULTIPLE" => Ok(SolutionScope::Multiple),
            other => bail!("expected scope SINGLE or MULTIPLE, found {other}"),
        },
    }
}

/// Check a list of hole ids for range and repeats, naming every
/// offending element.
fn check_hole_list(field: &str, list: &[i64], holes: usize) -> Result<Vec<Vertex>> {
    let bad: Vec<i64> = list
        .iter()
        .copied()
        .filter(|&v| v < 0 || v >= holes as i64)
        .collect();
    if !bad.is_empty() {
        bail!(
            "'{field}' should contain only integers between 0 and {}, found {bad:?}",
            holes - 1
        );
    }

    let mut seen = FxHashSet::default();
    let repeats: Vec<i64> = list.iter().copied().filter(|&v| !seen.insert(v)).collect();
    if !repeats.is_empty() {
        bail!("'{field}' lists holes more than once: {repeats:?}");
    }

    Ok(list.iter().map(|&v| v as Vertex).collect())
}
