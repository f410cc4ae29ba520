//! Terminal Demo - the reveal panel in a terminal
//!
//! - Scroll up with the wheel at the top of the page, or drag down from the
//!   top, to reveal the clock
//! - Hover the cards to tilt them
//! - `c` or a click on `×` closes the panel, `q`/Esc quits
//!
//! An optional argument names a TOML config file:
//!
//! ```text
//! RUST_LOG=pulldown_reveal=debug cargo run --example terminal -- reveal.toml 2>reveal.log
//! ```

use std::error::Error;
use std::io::stdout;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tokio::task::LocalSet;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pulldown_reveal::host::CELL_HEIGHT_PX;
use pulldown_reveal::state::tilt::MAX_ROTATION_DEG;
use pulldown_reveal::{Host, InputEvent, RevealConfig, TerminalHost, mount, mount_tilt};

/// Rows scrolled per wheel notch.
const WHEEL_ROWS: i32 = 3;

/// Wheel delta reported per notch, in CSS pixels.
const WHEEL_DELTA: f64 = 100.0;

// =============================================================================
// INPUT THREAD
// =============================================================================

/// Reads crossterm events on a dedicated thread and forwards them.
///
/// `event::read()` blocks, so it cannot run on the runtime thread. The poll
/// timeout only bounds how long shutdown takes.
struct InputThread {
    handle: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

impl InputThread {
    fn spawn(tx: UnboundedSender<Event>) -> std::io::Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let handle = thread::Builder::new()
            .name("reveal-input".to_string())
            .spawn(move || {
                while flag.load(Ordering::SeqCst) {
                    match event::poll(Duration::from_millis(100)) {
                        Ok(true) => match event::read() {
                            Ok(ev) => {
                                if tx.send(ev).is_err() {
                                    break;
                                }
                            }
                            Err(err) => warn!(error = %err, "input read failed"),
                        },
                        Ok(false) => continue,
                        Err(err) => {
                            warn!(error = %err, "input poll failed");
                            break;
                        }
                    }
                }
            })?;
        Ok(Self {
            handle: Some(handle),
            running,
        })
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("input thread panicked");
            }
        }
    }
}

impl Drop for InputThread {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// MAIN
// =============================================================================

fn load_config() -> Result<RevealConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let source = std::fs::read_to_string(&path)?;
            Ok(RevealConfig::from_toml_str(&source)?)
        }
        None => Ok(RevealConfig::default()),
    }
}

async fn run(config: RevealConfig) -> Result<(), Box<dyn Error>> {
    let terminal = Rc::new(TerminalHost::new()?);
    let host: Rc<dyn Host> = terminal.clone();

    let mut tilt = mount_tilt(Rc::clone(&host), MAX_ROTATION_DEG);
    tilt.register(1, terminal.add_card(1, 8, 8, 28, 7), true);
    tilt.register(2, terminal.add_card(2, 44, 8, 28, 7), false);

    let mut handle = mount(host, config)?;

    let (tx, mut rx) = unbounded_channel();
    let mut input = InputThread::spawn(tx)?;

    while let Some(ev) = rx.recv().await {
        match ev {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('c') => {
                    handle.click_close();
                }
                _ => {}
            },
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => {
                let y = row as f64 * CELL_HEIGHT_PX;
                match kind {
                    // Dispatch before scrolling: the gesture sees the offset
                    // the wheel started from.
                    MouseEventKind::ScrollUp => {
                        handle.dispatch(InputEvent::Wheel {
                            delta_y: -WHEEL_DELTA,
                        });
                        terminal.scroll_by(-WHEEL_ROWS)?;
                    }
                    MouseEventKind::ScrollDown => {
                        handle.dispatch(InputEvent::Wheel {
                            delta_y: WHEEL_DELTA,
                        });
                        terminal.scroll_by(WHEEL_ROWS)?;
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        if terminal.close_button_hit(column, row) {
                            handle.click_close();
                        } else {
                            handle.dispatch(InputEvent::MouseDown { y });
                        }
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        handle.dispatch(InputEvent::MouseMove { y });
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        handle.dispatch(InputEvent::MouseUp);
                    }
                    MouseEventKind::Moved => {
                        let (px, py) = TerminalHost::cell_to_px(column, row);
                        tilt.pointer_move(px, py);
                    }
                    _ => {}
                }
            }
            Event::FocusLost => {
                tilt.pointer_leave();
            }
            Event::Resize(width, height) => terminal.resize(width, height)?,
            _ => {}
        }
    }

    input.stop();
    info!(runs = handle.panel().run_count(), "demo finished");
    handle.unmount();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;

    let result = LocalSet::new().block_on(&runtime, run(config));

    execute!(stdout(), Show, DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}
