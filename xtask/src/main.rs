//! Build automation and glyph previews for the digit matrix firmware.
//!
//! Run with: `cargo xtask <command>`

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use clap::{Parser, Subcommand};
use digit_matrix::{DIGIT_COLOR, Digit, MATRIX_HEIGHT, MATRIX_WIDTH, PixelBuffer};
use owo_colors::OwoColorize;

const FIRMWARE_TARGET: &str = "thumbv6m-none-eabi";
const FIRMWARE_NAME: &str = "digit-matrix";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for the digit matrix firmware", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the firmware, run host tests, build docs
    CheckAll,
    /// Build the firmware image
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Build a release image and convert it to UF2 for drag-and-drop flashing
    Uf2,
    /// Print digit glyphs as they appear on the matrix
    Preview {
        /// Only this digit (0-9)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=9))]
        digit: Option<u8>,
    },
    /// Write one PNG per digit glyph
    Png {
        #[arg(long, default_value = "target/glyphs")]
        out: PathBuf,
        /// Pixels per LED
        #[arg(long, default_value_t = 16)]
        scale: u32,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Build { release } => build_firmware(release),
        Commands::Uf2 => build_uf2(),
        Commands::Preview { digit } => preview(digit),
        Commands::Png { out, scale } => write_pngs(&out, scale),
    }
}

fn check_all() -> ExitCode {
    let workspace_root = workspace_root();

    println!("{}", "==> Building firmware...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--bin",
        FIRMWARE_NAME,
        "--target",
        FIRMWARE_TARGET,
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Running host tests...".cyan());
    let host_target = host_target();
    match host_target.as_deref() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }

    let mut test_cmd = Command::new("cargo");
    test_cmd
        .current_dir(&workspace_root)
        .args(["test", "--package", FIRMWARE_NAME]);
    if let Some(target) = host_target {
        test_cmd.arg("--target").arg(target);
    }
    test_cmd.args(["--no-default-features", "--features", "host"]);
    if !run_command(&mut test_cmd) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building documentation...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "doc",
        "--package",
        FIRMWARE_NAME,
        "--target",
        FIRMWARE_TARGET,
        "--no-deps",
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> All checks passed!".green().bold());
    ExitCode::SUCCESS
}

fn build_firmware(release: bool) -> ExitCode {
    if firmware_builds(release) {
        println!("{}", "Build successful!".green());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn firmware_builds(release: bool) -> bool {
    let mut cmd = Command::new("cargo");
    cmd.current_dir(workspace_root()).args([
        "build",
        "--bin",
        FIRMWARE_NAME,
        "--target",
        FIRMWARE_TARGET,
    ]);
    if release {
        cmd.arg("--release");
    }

    println!("{}", format!("Building {FIRMWARE_NAME} for {FIRMWARE_TARGET}").cyan());
    run_command(&mut cmd)
}

fn build_uf2() -> ExitCode {
    if !firmware_builds(true) {
        return ExitCode::FAILURE;
    }

    let elf_path = format!("target/{FIRMWARE_TARGET}/release/{FIRMWARE_NAME}");
    let uf2_path = format!("{FIRMWARE_NAME}.uf2");

    println!("\n{}", "Converting to UF2 format...".cyan());
    if run_command(
        Command::new("elf2uf2-rs")
            .current_dir(workspace_root())
            .args([&elf_path, &uf2_path]),
    ) {
        println!("{}", format!("UF2 created: {uf2_path}").green().bold());
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            "Note: Install elf2uf2-rs with: cargo install elf2uf2-rs".yellow()
        );
        ExitCode::FAILURE
    }
}

fn rendered(digit: Digit) -> PixelBuffer {
    let mut buffer = PixelBuffer::new();
    buffer.render_digit(digit, DIGIT_COLOR);
    buffer
}

fn selected_digits(only: Option<u8>) -> Vec<Digit> {
    (0..=9)
        .filter(|value| only.is_none_or(|only| only == *value))
        .filter_map(Digit::new)
        .collect()
}

/// Rows are printed from the last LED row down, which is how the board shows them.
fn preview(only: Option<u8>) -> ExitCode {
    for digit in selected_digits(only) {
        let buffer = rendered(digit);
        println!("{}", format!("digit {}", digit.value()).cyan());
        for row in (0..MATRIX_HEIGHT).rev() {
            let line: String = (0..MATRIX_WIDTH)
                .map(|col| {
                    let pixel = buffer.get(row * MATRIX_WIDTH + col);
                    if pixel == Default::default() {
                        "· ".bright_black().to_string()
                    } else {
                        "██".truecolor(pixel.r, pixel.g.saturating_mul(4), pixel.b).to_string()
                    }
                })
                .collect();
            println!("  {line}");
        }
        println!();
    }
    ExitCode::SUCCESS
}

fn write_pngs(out: &Path, scale: u32) -> ExitCode {
    if let Err(err) = std::fs::create_dir_all(out) {
        eprintln!("{}", format!("Cannot create {}: {err}", out.display()).red());
        return ExitCode::FAILURE;
    }

    for digit in selected_digits(None) {
        let path = out.join(format!("digit_{}.png", digit.value()));
        if let Err(err) = write_png(&path, &rendered(digit), scale) {
            eprintln!("{}", format!("Failed to write {}: {err}", path.display()).red());
            return ExitCode::FAILURE;
        }
        println!("  {}", path.display().bright_black());
    }
    println!("{}", "Glyph images written.".green());
    ExitCode::SUCCESS
}

fn write_png(
    path: &Path,
    buffer: &PixelBuffer,
    scale: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let scale = scale.max(1) as usize;
    let width = MATRIX_WIDTH * scale;
    let height = MATRIX_HEIGHT * scale;

    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        // Flip vertically so the image matches the board.
        let row = MATRIX_HEIGHT - 1 - y / scale;
        for x in 0..width {
            let pixel = buffer.get(row * MATRIX_WIDTH + x / scale);
            data.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
        }
    }

    let mut encoder = png::Encoder::new(
        BufWriter::new(File::create(path)?),
        u32::try_from(width)?,
        u32::try_from(height)?,
    );
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&data)?;
    Ok(())
}

fn workspace_root() -> PathBuf {
    std::env::current_dir().expect("Failed to get current directory")
}

fn host_target() -> Option<String> {
    let output = Command::new("rustc").arg("-vV").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("host: "))
        .map(|host| host.trim().to_owned())
}

fn run_command(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("{}", format!("Failed to execute command: {e}").red());
            false
        }
    }
}
