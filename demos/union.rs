//! Reads disk centers and writes the boundary records of their union.
//!
//! Input is whitespace-separated `x y` pairs, from a file or standard input.
//! Each output line is `a b x y`: disks `a` and `b` cross at `(x, y)`, or,
//! if `a == b`, disk `a` at `(x, y)` overlaps nothing.

use std::{
    io::{BufWriter, Read as _},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::fmt::SubscriberBuilder;

use disksweeper::{text, BoundaryEvent, Circle, Observer, Policy, Radius, Sweeper, Tally};

#[derive(Parser)]
struct Cli {
    /// Where to read centers from (standard input if omitted).
    input: Option<PathBuf>,

    /// The radius shared by all disks.
    #[arg(long, default_value_t = 0.5)]
    radius: f64,

    /// Sort the centers by `x` first. Disk ids then refer to the sorted order.
    #[arg(long)]
    sort: bool,

    /// Don't report disks that overlap nothing.
    #[arg(long)]
    no_standalone: bool,

    /// Write a diagnostic picture of the sweep to this file.
    #[cfg(feature = "debug-svg")]
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Log more (repeat for even more).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Default)]
struct Watch {
    tally: Tally,
    #[cfg(feature = "debug-svg")]
    trace: disksweeper::debug_svg::SvgTrace,
}

impl Observer for Watch {
    fn circle_inserted(&mut self, circle: &Circle, radius: &Radius) {
        self.tally.circle_inserted(circle, radius);
        #[cfg(feature = "debug-svg")]
        self.trace.circle_inserted(circle, radius);
    }

    fn crossing_occluded(&mut self, point: kurbo::Point, by: &Circle) {
        self.tally.crossing_occluded(point, by);
        #[cfg(feature = "debug-svg")]
        self.trace.crossing_occluded(point, by);
    }

    fn crossing_rejected(&mut self, point: kurbo::Point, by: &Circle) {
        self.tally.crossing_rejected(point, by);
        #[cfg(feature = "debug-svg")]
        self.trace.crossing_rejected(point, by);
    }

    fn event_emitted(&mut self, event: &BoundaryEvent) {
        self.tally.event_emitted(event);
        #[cfg(feature = "debug-svg")]
        self.trace.event_emitted(event);
    }
}

pub fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let input = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let mut centers = text::parse_centers(&input)?;
    if args.sort {
        text::sort_centers(&mut centers);
    }
    tracing::info!(centers = centers.len(), radius = args.radius, "read input");

    let radius = Radius::new(args.radius)?;
    let policy = if args.no_standalone {
        Policy::DropStandalone
    } else {
        Policy::ReportStandalone
    };
    let mut sweeper = Sweeper::with_observer(radius, Watch::default()).with_policy(policy);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_error = None;
    let mut sink = |ev| {
        if write_error.is_none() {
            if let Err(e) = text::write_events(&mut out, [&ev]) {
                write_error = Some(e);
            }
        }
    };

    sweeper.begin();
    for (i, &(x, y)) in centers.iter().enumerate() {
        sweeper
            .push(x, y, &mut sink)
            .with_context(|| format!("center #{i} ({x}, {y})"))?;
    }
    sweeper.end(&mut sink)?;
    drop(sink);
    if let Some(e) = write_error {
        return Err(e.into());
    }
    std::io::Write::flush(&mut out)?;

    let watch = sweeper.into_observer();
    let Tally {
        circles,
        occluded,
        rejected,
        crossings,
        standalone,
    } = watch.tally;
    tracing::info!(circles, occluded, rejected, crossings, standalone, "done");

    #[cfg(feature = "debug-svg")]
    {
        if let Some(path) = &args.svg {
            svg::save(path, &watch.trace.document())
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
    }

    Ok(())
}
