//! Terminal slider for exploring roof pitches.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use domeshed::drawing::{build_sheet, paint_sheet, CharCanvas};
use domeshed::{solve, StructureGeometry, StructureParameters};
use tracing::{debug, warn};

use crate::export::{default_png_path, export, ExportTargets};

/// Lowest pitch the slider offers.
pub const MIN_PITCH: f64 = 20.0;
/// Highest pitch the slider offers.
pub const MAX_PITCH: f64 = 35.0;
/// Pitch change per key press.
pub const PITCH_STEP: f64 = 0.5;

/// Current position of the pitch slider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PitchSlider {
    /// Pitch in degrees, always on the step grid.
    pitch: f64,
}

impl PitchSlider {
    /// Slider at `pitch`, clamped and snapped to the step grid.
    #[must_use]
    pub fn new(pitch: f64) -> Self {
        Self {
            pitch: snap(pitch),
        }
    }

    /// Current pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Move by `steps` increments; returns whether the pitch changed.
    pub fn step(&mut self, steps: i32) -> bool {
        self.set(self.pitch + f64::from(steps) * PITCH_STEP)
    }

    /// Jump to `pitch`; returns whether the pitch changed.
    pub fn set(&mut self, pitch: f64) -> bool {
        let next = snap(pitch);
        let changed = next != self.pitch;
        self.pitch = next;
        changed
    }
}

/// Clamp to the slider range and round to the nearest step.
fn snap(pitch: f64) -> f64 {
    ((pitch.clamp(MIN_PITCH, MAX_PITCH) - MIN_PITCH) / PITCH_STEP).round() * PITCH_STEP
        + MIN_PITCH
}

/// What a key press asks the loop to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    /// Move the slider by this many steps.
    Step(i32),
    /// Jump to the shallowest pitch.
    First,
    /// Jump to the steepest pitch.
    Last,
    /// Export the current drawing.
    Save,
    /// Leave the slider.
    Quit,
}

/// Key binding table of the slider.
fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Down | KeyCode::Char('h') => Some(Action::Step(-1)),
        KeyCode::Right | KeyCode::Up | KeyCode::Char('l') => Some(Action::Step(1)),
        KeyCode::Home => Some(Action::First),
        KeyCode::End => Some(Action::Last),
        KeyCode::Char('s') => Some(Action::Save),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Slider bar such as `20° [-----|----------] 35°`.
fn slider_bar(slider: &PitchSlider, width: usize) -> String {
    let width = width.max(2);
    let fraction = (slider.pitch() - MIN_PITCH) / (MAX_PITCH - MIN_PITCH);
    let position = (fraction * (width - 1) as f64).round() as usize;
    let track: String = (0..width)
        .map(|index| if index == position { '|' } else { '-' })
        .collect();
    format!("{MIN_PITCH:.0}° [{track}] {MAX_PITCH:.0}°")
}

/// Restores the terminal when dropped, including on early returns.
struct TerminalGuard;

impl TerminalGuard {
    /// Switch to raw mode and the alternate screen.
    fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, Hide)
            .context("failed to enter the alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(error) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
            warn!(%error, "failed to leave the alternate screen");
        }
        if let Err(error) = disable_raw_mode() {
            warn!(%error, "failed to disable raw mode");
        }
    }
}

/// Settings the interactive view keeps across redraws.
#[derive(Debug, Clone)]
pub struct Session {
    /// Structure with everything but the pitch fixed.
    pub parameters: StructureParameters,
    /// PNG path for saves; named after the pitch when absent.
    pub output: Option<PathBuf>,
    /// SVG written alongside each save.
    pub svg: Option<PathBuf>,
    /// JSON written alongside each save.
    pub json: Option<PathBuf>,
    /// Canvas width for saved images.
    pub width: u32,
    /// Canvas height for saved images.
    pub height: u32,
}

impl Session {
    /// Files a save at `pitch` writes.
    #[must_use]
    pub fn targets(&self, pitch: f64) -> ExportTargets {
        ExportTargets {
            png: self
                .output
                .clone()
                .unwrap_or_else(|| default_png_path(pitch)),
            svg: self.svg.clone(),
            json: self.json.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Run the pitch slider until the user quits.
///
/// # Errors
///
/// Fails when the terminal cannot be driven or the fixed dimensions cannot be solved.
pub fn run(session: &Session) -> Result<()> {
    let mut slider = PitchSlider::new(session.parameters.roof_pitch_degrees);
    let mut status = String::from("Left/Right adjust pitch, s saves, q quits");
    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();

    loop {
        let geometry = solve(&session.parameters.with_roof_pitch(slider.pitch()))
            .context("the fixed dimensions cannot be solved")?;
        draw(&mut stdout, &geometry, &slider, &status)?;

        let Event::Key(key) = event::read().context("failed to read terminal event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match action_for(key.code) {
            Some(Action::Step(steps)) => {
                slider.step(steps);
            }
            Some(Action::First) => {
                slider.set(MIN_PITCH);
            }
            Some(Action::Last) => {
                slider.set(MAX_PITCH);
            }
            Some(Action::Save) => {
                let targets = session.targets(slider.pitch());
                status = match export(&geometry, &targets) {
                    Ok(written) => saved_status(&written),
                    Err(error) => format!("Save failed: {error:#}"),
                };
            }
            Some(Action::Quit) => break,
            None => {}
        }
        debug!(pitch = slider.pitch(), "slider moved");
    }
    Ok(())
}

/// Status line listing every file a save wrote.
fn saved_status(written: &[PathBuf]) -> String {
    let names: Vec<String> = written
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    format!("Saved {}", names.join(", "))
}

/// Redraw the sheet, the slider and the status line.
fn draw(
    out: &mut impl Write,
    geometry: &StructureGeometry,
    slider: &PitchSlider,
    status: &str,
) -> Result<()> {
    let (columns, rows) = terminal::size().context("failed to query terminal size")?;
    let columns = usize::from(columns);
    // Two rows below the drawing hold the slider and the status line.
    let drawing_rows = usize::from(rows).saturating_sub(2).max(1);

    let mut canvas = CharCanvas::new(columns, drawing_rows);
    paint_sheet(&build_sheet(geometry), &mut canvas);

    queue!(out, Clear(ClearType::All))?;
    for (row, line) in canvas.lines().iter().enumerate() {
        queue!(out, MoveTo(0, row as u16))?;
        write!(out, "{}", line.trim_end())?;
    }
    let bar = slider_bar(slider, columns.saturating_sub(24).min(60));
    queue!(out, MoveTo(0, drawing_rows as u16))?;
    write!(out, "Pitch {:>4.1}°  {bar}", slider.pitch())?;
    queue!(out, MoveTo(0, drawing_rows as u16 + 1))?;
    write!(out, "{status}")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_clamps_to_range() {
        let mut slider = PitchSlider::new(10.0);
        assert_eq!(slider.pitch(), MIN_PITCH);
        assert!(!slider.step(-1));
        slider.set(100.0);
        assert_eq!(slider.pitch(), MAX_PITCH);
        assert!(!slider.step(1));
    }

    #[test]
    fn slider_moves_in_half_degrees() {
        let mut slider = PitchSlider::new(22.3);
        assert_eq!(slider.pitch(), 22.5);
        assert!(slider.step(1));
        assert_eq!(slider.pitch(), 23.0);
        slider.step(-3);
        assert_eq!(slider.pitch(), 21.5);
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(action_for(KeyCode::Left), Some(Action::Step(-1)));
        assert_eq!(action_for(KeyCode::Char('l')), Some(Action::Step(1)));
        assert_eq!(action_for(KeyCode::Home), Some(Action::First));
        assert_eq!(action_for(KeyCode::Char('s')), Some(Action::Save));
        assert_eq!(action_for(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(action_for(KeyCode::Char('x')), None);
    }

    fn session(output: Option<PathBuf>) -> Session {
        Session {
            parameters: StructureParameters::default(),
            output,
            svg: Some(PathBuf::from("plan.svg")),
            json: None,
            width: 1100,
            height: 500,
        }
    }

    #[test]
    fn saves_follow_requested_paths() {
        let targets = session(Some(PathBuf::from("shed.png"))).targets(27.0);
        assert_eq!(targets.png, PathBuf::from("shed.png"));
        assert_eq!(targets.svg, Some(PathBuf::from("plan.svg")));
        assert_eq!((targets.width, targets.height), (1100, 500));

        let targets = session(None).targets(27.0);
        assert_eq!(targets.png, PathBuf::from("hideout-27deg.png"));
    }

    #[test]
    fn status_lists_every_saved_file() {
        let written = [PathBuf::from("a.png"), PathBuf::from("a.svg")];
        assert_eq!(saved_status(&written), "Saved a.png, a.svg");
    }

    #[test]
    fn slider_bar_marks_position() {
        let bar = slider_bar(&PitchSlider::new(MAX_PITCH), 11);
        assert_eq!(bar, "20° [----------|] 35°");
        let bar = slider_bar(&PitchSlider::new(MIN_PITCH), 11);
        assert_eq!(bar, "20° [|----------] 35°");
    }
}
