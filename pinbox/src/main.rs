mod host;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};

use pinbox_core::{
    accepts_all, CodeBoxController, FontMeasurer, InputFilter, InputRule, MeasureSpec, TextStyle,
    UnderlineDecoration,
};

use host::{SimulatedHost, SyntheticStyle};

/// Width granted by the simulated parent layout
const PARENT_WIDTH: u32 = 240;

/// Pixels per terminal column in the ASCII rendering
const PX_PER_COLUMN: f32 = 4.0;

#[derive(Debug)]
struct DigitsOnly;

impl InputRule for DigitsOnly {
    fn accept(&self, candidate: &str) -> bool {
        candidate.chars().all(|c| c.is_ascii_digit())
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting pinbox demo - monospace code-box layout");

    // Load configuration
    let config = pinbox_core::Config::load(None)?;
    info!("Loaded configuration: {:?}", config);

    let mut style: Box<dyn TextStyle> = match FontMeasurer::from_system(config.font.font_size) {
        Ok(measurer) => Box::new(measurer),
        Err(e) => {
            warn!("No system font available ({}), using synthetic metrics", e);
            Box::new(SyntheticStyle::new(config.font.font_size))
        }
    };

    let mut controller = CodeBoxController::new(&config)?;
    let decoration = Rc::new(RefCell::new(UnderlineDecoration::new(
        config.decoration.padding,
    )?));
    controller.set_decoration(decoration.clone());

    let mut host = SimulatedHost::new();
    host.push_filter(InputFilter::Rule(Arc::new(DigitsOnly)));
    controller.sync_filters(&mut host);
    info!("Host filters after reconciliation: {:?}", host.filter_list());

    // Measure and stabilize: each deferred pre-draw forces a re-measure
    let measured = loop {
        let size = controller.on_measure(
            &mut host,
            style.as_mut(),
            MeasureSpec::AtMost(PARENT_WIDTH),
            MeasureSpec::Unspecified,
        );
        if controller.on_pre_draw(style.as_mut()) {
            break size;
        }
    };

    info!(
        "Stabilized at {}x{} px, letter spacing {:.3} em",
        measured.0,
        measured.1,
        style.letter_spacing()
    );

    render(&decoration.borrow(), measured.0);

    for candidate in ["1234", "12345", "12a4"] {
        info!(
            "input {:?} -> {}",
            candidate,
            if accepts_all(host.filter_list(), candidate) {
                "accepted"
            } else {
                "rejected"
            }
        );
    }

    Ok(())
}

/// Rasterize the underline segments into one terminal row
fn render(decoration: &UnderlineDecoration, box_width: u32) {
    let columns = (box_width as f32 / PX_PER_COLUMN).ceil() as usize;
    let mut row = vec![' '; columns];

    for segment in decoration.segments() {
        let from = (segment.start_x / PX_PER_COLUMN).floor() as usize;
        let to = (segment.end_x / PX_PER_COLUMN).ceil() as usize;
        for cell in row.iter_mut().take(to.min(columns)).skip(from) {
            *cell = '_';
        }
    }

    println!("|{}|", row.into_iter().collect::<String>());
}
