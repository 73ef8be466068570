//! Photo viewer demo
//!
//! Opens each image given on the command line (paths or http(s) URLs) on a
//! gently swaying plane. Without arguments a file dialog asks for images.
//!
//! Controls:
//! - drag with the left button to tilt the photo
//! - scroll to zoom
//! - `N`/`P` or the arrow keys to switch image, `R` to reset the view
//! - drop a file on the window to open it

use anyhow::Context;
use clap::Parser;
use photoplane_core::ViewerSettings;
use photoplane_gpu::RenderConfig;
use photoplane_viewer::PhotoViewer;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff"];

#[derive(Parser, Debug)]
#[command(name = "view_photo")]
#[command(about = "Show photos as a tiltable plane in 3D")]
struct Args {
    /// Image paths or URLs
    images: Vec<String>,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 1200.0)]
    width: f64,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Window title
    #[arg(long, default_value = "photoplane")]
    title: String,

    /// Present without waiting for vsync
    #[arg(long)]
    no_vsync: bool,

    /// Disable 4x multisample antialiasing
    #[arg(long)]
    no_msaa: bool,
}

fn pick_images() -> Vec<String> {
    rfd::FileDialog::new()
        .add_filter("Images", IMAGE_EXTENSIONS)
        .add_filter("All", &["*"])
        .pick_files()
        .unwrap_or_default()
        .into_iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let images = if args.images.is_empty() {
        pick_images()
    } else {
        args.images
    };
    if images.is_empty() {
        log::info!("No image selected");
        return Ok(());
    }

    let render_config = RenderConfig {
        present_mode: if args.no_vsync {
            wgpu::PresentMode::AutoNoVsync
        } else {
            wgpu::PresentMode::AutoVsync
        },
        enable_multisampling: !args.no_msaa,
        ..RenderConfig::default()
    };

    log::info!("Showing {} image(s)", images.len());
    PhotoViewer::new(ViewerSettings::default())
        .with_render_config(render_config)
        .with_window(args.title, args.width, args.height)
        .run(images)
        .context("viewer stopped with an error")?;

    Ok(())
}
