//! Host-side helper.
//!
//! `serve` builds the WASM site and serves `static/` locally; `render` runs
//! the sketch headless (replaying clicks and frames) and writes a PNG.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::path::{Path, PathBuf};
    use std::process::{Command, Stdio};
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{bail, Context};
    use clap::{Parser, Subcommand};
    use splitscroll::raster::PixelSurface;
    use splitscroll::{SeededRandom, Sketch, SketchConfig};

    #[derive(Parser)]
    #[command(name = "splitscroll", about = "Click-to-split scrolling gradient canvas")]
    struct Cli {
        /// TOML configuration file
        #[arg(long, global = true)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        command: Cmd,
    }

    #[derive(Subcommand)]
    enum Cmd {
        /// Build the wasm bundle and serve `static/` on localhost.
        Serve {
            #[arg(long, default_value_t = 8000)]
            port: u16,
            /// Serve whatever is already in `static/pkg`.
            #[arg(long)]
            skip_build: bool,
        },
        /// Render a frame headless and write it as PNG.
        Render {
            #[arg(long, default_value_t = 800)]
            width: u32,
            #[arg(long, default_value_t = 600)]
            height: u32,
            /// Overrides the config seed.
            #[arg(long)]
            seed: Option<u64>,
            /// Clicks to replay, as `x,y` in canvas pixels.
            #[arg(long = "click", value_parser = parse_point)]
            clicks: Vec<(f64, f64)>,
            /// Animation frames to advance after the clicks.
            #[arg(long, default_value_t = 0)]
            frames: u32,
            #[arg(short, long, default_value = "gradient-art.png")]
            output: PathBuf,
        },
    }

    fn parse_point(s: &str) -> Result<(f64, f64), String> {
        let (x, y) = s.split_once(',').ok_or_else(|| format!("expected x,y, got {s:?}"))?;
        let x = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
        let y = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
        Ok((x, y))
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let cli = Cli::parse();
        let config = match &cli.config {
            Some(path) => SketchConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => SketchConfig::default(),
        };

        match cli.command {
            Cmd::Serve { port, skip_build } => serve(port, skip_build),
            Cmd::Render {
                width,
                height,
                seed,
                clicks,
                frames,
                output,
            } => {
                let seed = seed.or(config.seed).unwrap_or_else(clock_seed);
                let segments = render(config, width, height, seed, &clicks, frames, &output)?;
                log::info!("wrote {} ({segments} segments)", output.display());
                Ok(())
            }
        }
    }

    /// Replay `clicks`, advance `frames`, write the final frame as PNG and
    /// return the segment count.
    fn render(
        config: SketchConfig,
        width: u32,
        height: u32,
        seed: u64,
        clicks: &[(f64, f64)],
        frames: u32,
        output: &Path,
    ) -> anyhow::Result<usize> {
        log::info!("rendering {width}x{height}, seed {seed}");
        let mut surface = PixelSurface::new(width, height)?;
        let mut sketch = Sketch::new(width as f64, height as f64, config, Box::new(SeededRandom::new(seed)));
        for &(x, y) in clicks {
            if !sketch.click(x, y) {
                log::warn!("click at ({x}, {y}) did not land on a segment");
            }
        }
        for _ in 0..frames {
            sketch.frame(&mut surface);
        }
        sketch.redraw(&mut surface);
        surface.save_png(output)?;
        Ok(sketch.store().len())
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    fn serve(port: u16, skip_build: bool) -> anyhow::Result<()> {
        if !skip_build {
            log::info!("building WASM pkg");
            match Command::new("wasm-pack")
                .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
                .status()
            {
                Ok(st) if st.success() => {}
                Ok(_) => bail!(
                    "wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/)."
                ),
                Err(_) => log::warn!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts."),
            }
        }

        log::info!("launching local server at http://127.0.0.1:{port}");
        let status = Command::new("python3")
            .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
            .stdout(Stdio::null())
            .status()
            .context("failed to start http server")?;
        if !status.success() {
            bail!("http server exited with {status}");
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = host::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
