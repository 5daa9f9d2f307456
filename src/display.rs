// Copyright (C) 2020-2024 Andy Kurnia.

use super::{board, board_layout, matrix};
use std::fmt::Write;

#[inline(always)]
pub fn empty_label(board: &board::Board, pos: matrix::Position) -> char {
    if board.is_empty() && board.starting_position() == Some(pos) {
        return '*';
    }
    match board.multiplier_at(pos) {
        Some(board_layout::Multiplier::Word(3)) => '=',
        Some(board_layout::Multiplier::Word(2)) => '-',
        Some(board_layout::Multiplier::Word(_)) => '~',
        Some(board_layout::Multiplier::Tile(3)) => '"',
        Some(board_layout::Multiplier::Tile(2)) => '\'',
        Some(board_layout::Multiplier::Tile(_)) => '`',
        None => ' ',
    }
}

// Letters are uppercase, blanks lowercase.
#[inline(always)]
pub fn board_label(board: &board::Board, pos: matrix::Position) -> char {
    match board.tile_at(pos) {
        Some(t) => t.label(),
        None => empty_label(board, pos),
    }
}

#[inline(always)]
pub fn column(col: i8) -> char {
    ((col as u8) + b'a') as char
}

fn write_edge(s: &mut String, cols: i8) {
    s.push_str("  +");
    for _ in 1..cols {
        s.push_str("--");
    }
    s.push_str("-+\n");
}

fn write_columns(s: &mut String, cols: i8) {
    s.push_str("  ");
    for c in 0..cols {
        s.push(' ');
        s.push(column(c));
    }
    s.push('\n');
}

pub fn fmt_board(board: &board::Board) -> String {
    let dim = board.dim();
    let mut s = String::new();
    write_columns(&mut s, dim.cols);
    write_edge(&mut s, dim.cols);
    for r in 0..dim.rows {
        let _ = write!(s, "{:2}|", r + 1);
        for c in 0..dim.cols {
            if c > 0 {
                s.push(' ');
            }
            s.push(board_label(board, matrix::Position::new(c, r)));
        }
        let _ = writeln!(s, "|{}", r + 1);
    }
    write_edge(&mut s, dim.cols);
    write_columns(&mut s, dim.cols);
    s
}

pub fn print_board(board: &board::Board) {
    print!("{}", fmt_board(board));
}
