// Copyright (C) 2020-2024 Andy Kurnia.

use lexiplay::{
    alphabet, bag, board, display, error, game_config, game_state, lexicon, movegen, return_error,
    tile,
};
use std::sync::Arc;

// board: one string per row of the standard board. A-Z are tiles, a-z are
// blanks played as that letter, anything else is an empty cell.
// rack: A-Z, with '*' for a blank.
// count: maximum number of moves returned, highest scores first.
#[derive(serde::Deserialize)]
struct Question {
    board: Vec<String>,
    rack: String,
    count: usize,
}

pub fn main() -> error::Returns<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    let args = std::env::args().collect::<Vec<_>>();
    if args.len() <= 1 {
        return Err("usage: json WORDLIST [QUESTION_FILE]".into());
    }
    let lexicon = lexicon::Lexicon::from_path(&args[1])?;
    let data = match args.get(2) {
        Some(path) => std::fs::read_to_string(path)?,
        None => std::io::read_to_string(std::io::stdin())?,
    };
    let question = serde_json::from_str::<Question>(&data)?;

    let letter_values = alphabet::ENGLISH_ALPHABET.letter_values();
    let mut board = board::make_scrabble_board()?;
    let dim = board.dim();
    if question.board.len() != dim.rows as usize {
        return_error!(format!(
            "board: need {} rows, found {} rows",
            dim.rows,
            question.board.len()
        ));
    }
    for (row_num, row) in question.board.iter().enumerate() {
        if row.chars().count() > dim.cols as usize {
            return_error!(format!(
                "board row {} (0-based): need at most {} cols, found {} cols",
                row_num,
                dim.cols,
                row.chars().count()
            ));
        }
    }
    for (pos, t) in board::tiles_from_fixture(&question.board.join("\n"), &letter_values)? {
        if t == tile::Tile::BLANK {
            return_error!(format!("board: blank at {} has no letter", pos));
        }
        board.set_tile(pos, t);
    }

    let rack = tile::tiles_from_str(&question.rack, &letter_values)?;
    if rack
        .iter()
        .any(|t| matches!(t, tile::Tile::Blank { letter: Some(_) }))
    {
        return_error!(format!(
            "rack {:?}: write blanks as '{}'",
            question.rack,
            alphabet::BLANK_LABEL
        ));
    }

    let game_config = Arc::new(game_config::make_scrabble_game_config(Arc::new(lexicon)));
    let mut state = game_state::GameState::new(
        game_config,
        board,
        bag::Bag::new(Vec::new()),
        vec![game_state::Player::new(0)],
    )?;
    state.players[0].rack = rack;
    log::debug!("\n{}", display::fmt_board(&state.board));

    let mut plays = movegen::generate_all(&state)
        .into_iter()
        .map(|place| (place.score(&state), place))
        .collect::<Vec<_>>();
    // stable, so equal scores keep the generator's order
    plays.sort_by(|a, b| b.0.cmp(&a.0));
    log::info!("found {} moves", plays.len());
    plays.truncate(question.count);

    let mut result = Vec::<serde_json::Value>::with_capacity(plays.len());
    for (score, place) in plays.iter() {
        log::debug!("{} {}", score, place);
        let tiles = place
            .placings()
            .iter()
            .map(|(pos, placing)| {
                serde_json::json!({
                    "x": pos.x,
                    "y": pos.y,
                    "letter": (placing.letter() as char).to_string(),
                    "blank": matches!(placing, tile::Placing::Blank { .. }) })
            })
            .collect::<Vec<_>>();
        result.push(serde_json::json!({
            "score": score,
            "tiles": tiles }));
    }
    let ret = serde_json::to_value(result)?;
    println!("{}", serde_json::to_string_pretty(&ret)?);

    Ok(())
}
