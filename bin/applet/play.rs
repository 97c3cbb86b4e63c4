use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Color, File, Position, Rank, Role, Square};
use lib::game::{Phase, Session, TimeControl};
use std::io::{stdin, BufRead};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::instrument;

/// A point and click game of chess in the terminal.
///
/// Board squares stand in for clicks: type a square to select a piece and
/// another to move it there. Pending promotions are resolved by typing one of
/// `q`, `r`, `b`, or `n`.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The time control for both players.
    #[clap(short, long, default_value_t)]
    time_control: TimeControl,

    /// The position to start from, in Forsyth-Edwards notation.
    #[clap(short, long)]
    fen: Option<Position>,

    /// The directory where exported positions are saved.
    #[clap(short, long, default_value = ".")]
    export_dir: PathBuf,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut session = Session::new(self.time_control);

        match self.fen {
            Some(pos) => session.start_from(pos),
            None => session.start_game(),
        }

        println!("{}", render(&session));

        let mut clock = Instant::now();
        for line in stdin().lock().lines() {
            let line = line?;
            let input = line.trim();

            session.tick(clock.elapsed());
            clock = Instant::now();

            match input {
                "" => {}
                "quit" | "exit" => break,
                "start" | "restart" => session.restart_game(),
                "menu" => session.main_menu(),
                "draw" => session.agree_draw(),

                "export" => {
                    let path = session.export_fen(&self.export_dir)?;
                    println!("position saved to {}", path.display());
                    continue;
                }

                _ => {
                    if let Ok(sq) = input.parse::<Square>() {
                        session.square_clicked(sq);
                    } else if let Ok(role) = input.parse::<Role>() {
                        session.promotion_clicked(role);
                    } else {
                        println!("unrecognized input `{input}`");
                        continue;
                    }
                }
            }

            println!("{}", render(&session));
        }

        Ok(())
    }
}

fn mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn render(session: &Session) -> String {
    let mut out = String::new();

    if session.phase() == Phase::MainMenu {
        out.push_str("type `start` to begin a game, `quit` to leave");
        return out;
    }

    let highlights = session.selection().destinations();

    for r in Rank::iter().rev() {
        out.push(r.char());

        for f in File::iter() {
            let sq = Square::new(f, r);

            out.push(' ');
            match session.piece_on(sq) {
                Some(p) => out.push_str(&p.to_string()),
                None if highlights.contains(&sq) => out.push('*'),
                None => out.push('.'),
            }
        }

        out.push('\n');
    }

    out.push_str("  a b c d e f g h\n");

    out.push_str(&format!(
        "white {} black {}\n",
        mmss(session.clock(Color::White)),
        mmss(session.clock(Color::Black)),
    ));

    match session.phase() {
        Phase::GameOver(o) => out.push_str(&format!("game over, {o}")),
        _ if session.selection().is_awaiting_promotion() => {
            out.push_str("choose a promotion: q, r, b, or n")
        }
        _ => out.push_str(&format!("{} to move", session.position().turn())),
    }

    let history: Vec<_> = session.history().iter().map(|san| san.to_string()).collect();
    if !history.is_empty() {
        out.push('\n');
        out.push_str(&history.join(" "));
    }

    out
}
