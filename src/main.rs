//! Gibbet entry point: terminal front-end for the two-player round
//!
//! Player 1 types the secret word, player 2 guesses letters; between
//! inputs the frame loop advances the simulation so the gallows scene
//! animates. `--demo` plays a scripted losing round by itself;
//! `--dump-scene` / `--dump-state` print JSON snapshots after the demo.

use std::io::{self, BufRead, Write as _};
use std::time::{SystemTime, UNIX_EPOCH};

use gibbet::consts::FRAME_RATE;
use gibbet::scene::shapes::{BODY_COLOR, DrawCmd, GALLOWS_COLOR, ROPE_COLOR};
use gibbet::{GamePhase, GameState, Outcome, TickInput, tick};

/// Scene viewport rasterized into the terminal
const VIEW_W: f32 = 400.0;
const VIEW_H: f32 = 660.0;
const COLS: usize = 60;
const ROWS: usize = 33;

fn main() -> io::Result<()> {
    env_logger::init();

    let mut demo = false;
    let mut dump_scene = false;
    let mut dump_state = false;
    let mut seed = None;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--demo" => demo = true,
            "--dump-scene" => {
                demo = true;
                dump_scene = true;
            }
            "--dump-state" => {
                demo = true;
                dump_state = true;
            }
            "--seed" => seed = it.next().and_then(|s| s.parse().ok()),
            _ => {
                eprintln!("usage: gibbet [--demo] [--dump-scene] [--dump-state] [--seed N]");
                std::process::exit(2);
            }
        }
    }

    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("starting round with seed {seed}");

    if demo {
        run_demo(seed, dump_scene, dump_state)
    } else {
        run_interactive(seed)
    }
}

/// Advance the simulation by a number of idle frames.
fn run_frames(state: &mut GameState, frames: u32) {
    let input = TickInput::default();
    for _ in 0..frames {
        tick(state, &input);
    }
}

fn ready() -> TickInput {
    TickInput {
        ready: true,
        ..Default::default()
    }
}

fn run_interactive(seed: u64) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut state = GameState::new(seed);

    println!("G I B B E T  -  a two-player hangman round");
    println!("Press Enter to begin.");
    if lines.next().transpose()?.is_none() {
        return Ok(());
    }
    tick(&mut state, &ready());

    loop {
        while state.phase == GamePhase::SetWord {
            print!("Player 1, secret word: ");
            io::stdout().flush()?;
            let Some(word) = lines.next().transpose()? else {
                return Ok(());
            };
            tick(
                &mut state,
                &TickInput {
                    set_word: Some(word),
                    ..Default::default()
                },
            );
            if state.phase == GamePhase::SetWord {
                println!("{}", state.status);
            }
        }

        println!("\n{}\nPLAYER 1 LOOK AWAY! Press Enter to hand over.", state.status);
        if lines.next().transpose()?.is_none() {
            return Ok(());
        }
        tick(&mut state, &ready());
        println!("{}", state.status);

        while state.phase == GamePhase::Guessing {
            // Let the gallows settle for a second before showing it
            run_frames(&mut state, FRAME_RATE);
            print_board(&state);
            print!("Guess a letter: ");
            io::stdout().flush()?;
            let Some(line) = lines.next().transpose()? else {
                return Ok(());
            };
            tick(
                &mut state,
                &TickInput {
                    guess: line.trim().chars().next(),
                    ..Default::default()
                },
            );
        }

        // Round over; give the death sequence room to play out
        let frames = match state.outcome {
            Some(Outcome::Defeat) => 10 * FRAME_RATE,
            _ => FRAME_RATE,
        };
        run_frames(&mut state, frames);
        print_board(&state);
        println!("{}", state.status);
        println!("The word was {}.", state.word);

        print!("Play again? [y/N] ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };
        if !line.trim().eq_ignore_ascii_case("y") {
            return Ok(());
        }
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
    }
}

/// Scripted losing round: player 2 has a very bad night.
fn run_demo(seed: u64, dump_scene: bool, dump_state: bool) -> io::Result<()> {
    let mut state = GameState::new(seed);
    tick(&mut state, &ready());
    tick(
        &mut state,
        &TickInput {
            set_word: Some("GIBBET".to_string()),
            ..Default::default()
        },
    );
    tick(&mut state, &ready());
    println!("{}", state.status);

    for c in "XQZJVKW".chars() {
        if state.phase != GamePhase::Guessing {
            break;
        }
        tick(
            &mut state,
            &TickInput {
                guess: Some(c),
                ..Default::default()
            },
        );
        run_frames(&mut state, FRAME_RATE);
        print_board(&state);
    }

    // Struggle, snap, fall
    run_frames(&mut state, 6 * FRAME_RATE);
    print_board(&state);
    println!("{}", state.status);

    if dump_scene {
        let mut cmds = state.scene.frame();
        cmds.extend(state.scene.draw());
        let json = serde_json::to_string_pretty(&cmds).map_err(io::Error::other)?;
        println!("{json}");
    }
    if dump_state {
        let json = serde_json::to_string_pretty(&state).map_err(io::Error::other)?;
        println!("{json}");
    }
    Ok(())
}

fn print_board(state: &GameState) {
    let mut cmds = state.scene.frame();
    cmds.extend(state.scene.draw());
    println!("{}", rasterize(&cmds));
    let word: String = state
        .masked_word()
        .chars()
        .flat_map(|c| [c, ' '])
        .collect();
    let guessed: String = state.guessed.iter().collect();
    println!("Word: {}   Misses: {}/6   Guessed: {}", word.trim_end(), state.wrong_count, guessed);
}

/// Glyph for a draw color; anything unrecognized renders as blood.
fn glyph(color: [f32; 4]) -> u8 {
    if color == GALLOWS_COLOR {
        b'#'
    } else if color == ROPE_COLOR {
        b'|'
    } else if color == BODY_COLOR {
        b'o'
    } else {
        b'*'
    }
}

fn plot(grid: &mut [u8], x: f32, y: f32, ch: u8) {
    let col = (x / VIEW_W * COLS as f32) as isize;
    let row = (y / VIEW_H * ROWS as f32) as isize;
    if (0..COLS as isize).contains(&col) && (0..ROWS as isize).contains(&row) {
        grid[row as usize * COLS + col as usize] = ch;
    }
}

/// Rasterize the draw list into a character grid. Crude, but enough to
/// watch the figure grow and fall in a terminal.
fn rasterize(cmds: &[DrawCmd]) -> String {
    let mut grid = vec![b' '; COLS * ROWS];
    for cmd in cmds {
        match *cmd {
            DrawCmd::Line { a, b, color, .. } => {
                let ch = glyph(color);
                let steps = (a.distance(b).ceil() as usize).max(1);
                for i in 0..=steps {
                    let p = a.lerp(b, i as f32 / steps as f32);
                    plot(&mut grid, p.x, p.y, ch);
                }
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
                ..
            } => {
                let ch = glyph(color);
                if radius < 5.0 {
                    plot(&mut grid, center.x, center.y, ch);
                    continue;
                }
                for i in 0..32 {
                    let t = std::f32::consts::TAU * i as f32 / 32.0;
                    plot(
                        &mut grid,
                        center.x + radius * t.cos(),
                        center.y + radius * t.sin(),
                        ch,
                    );
                }
            }
        }
    }
    grid.chunks(COLS)
        .map(|row| String::from_utf8_lossy(row).into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}
