use anyhow::{Context, Result};
use clap::Parser;
use snipgrab_core::selection::BodyClickPolicy;
use snipgrab_core::{OverlayOptions, Preferences, SnipGrab};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Select which monitor to capture
    #[arg(long, default_value_t = 0)]
    monitor: usize,

    /// List available monitors and exit
    #[arg(long)]
    list_monitors: bool,

    /// Copy automatically on mouseup (overrides the saved preference)
    #[arg(long)]
    auto_copy: Option<bool>,

    /// Persist the auto-copy preference given via --auto-copy and exit
    #[arg(long, requires = "auto_copy")]
    save_preference: bool,

    /// Clicking inside the selection starts a new draw instead of moving it
    #[arg(long)]
    redraw_on_body_click: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.save_preference {
        let prefs = Preferences {
            auto_copy_on_mouseup: args.auto_copy.unwrap_or(true),
        };
        prefs.save().context("Failed to save preferences")?;
        println!(
            "Auto-copy on mouseup {}",
            if prefs.auto_copy_on_mouseup {
                "enabled"
            } else {
                "disabled"
            }
        );
        return Ok(());
    }

    let app = SnipGrab::new().context("Failed to initialize screen capturer")?;

    if args.list_monitors {
        println!("Available monitors:");
        for info in app.list_monitors() {
            println!("{}", info);
        }
        return Ok(());
    }

    let options = OverlayOptions {
        auto_copy_on_mouseup: args.auto_copy,
        body_click_policy: if args.redraw_on_body_click {
            BodyClickPolicy::RedrawSelection
        } else {
            BodyClickPolicy::MoveSelection
        },
    };

    app.run_interactive(args.monitor, options)
        .context("Failed to run snip overlay. Try --list-monitors to check indices")
}
