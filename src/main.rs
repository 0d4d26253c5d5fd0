// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use image::RgbaImage;
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use tracing::info;

use wowdecode::{Dimensions, S3TCFormat};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a raw block-compressed payload to a PNG image
    Texture(TextureArgs),

    /// Print the disassembly of a Direct3D 9 shader
    Shader(ShaderArgs),
}

#[derive(Args)]
struct TextureArgs {
    input: PathBuf,

    /// Block format: bc1..bc5, dxt1/dxt3/dxt5 or ati1/ati2
    #[arg(short, long)]
    format: S3TCFormat,

    /// Width of the top mip level in texels
    #[arg(long)]
    width: u32,

    /// Height of the top mip level in texels
    #[arg(long)]
    height: u32,

    /// Mip level to decode, counting down from the top level
    #[arg(long, default_value_t = 0)]
    mip: usize,

    /// Byte offset of the top mip level within the input
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Take BC5 green from its own block instead of mirroring red
    #[arg(long)]
    corrected_bc5: bool,

    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct ShaderArgs {
    input: PathBuf,
}

fn set_up_tracing() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();
}

fn texture(args: TextureArgs) -> Result<()> {
    let data = std::fs::read(&args.input)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", args.input.display()))?;

    let format = match args.format {
        S3TCFormat::BC5 { .. } => S3TCFormat::BC5 {
            corrected: args.corrected_bc5,
        },
        other => other,
    };

    let top = Dimensions::new(args.width, args.height)?;
    let dimensions = top
        .mips()
        .nth(args.mip)
        .ok_or_else(|| miette!("{top:?} has no mip level {}", args.mip))?;
    let start = format
        .mip_offset(top, args.mip)?
        .and_then(|offset| offset.checked_add(args.offset))
        .ok_or_else(|| miette!("mip level {} offset overflows", args.mip))?;
    let payload = data.get(start..).unwrap_or_default();

    let pixels = wowdecode::decode(format, dimensions.width(), dimensions.height(), payload)?;
    info!("decoded {pixels:?}");

    let image = RgbaImage::from_raw(pixels.width(), pixels.height(), pixels.to_rgba8())
        .ok_or_else(|| miette!("decoded buffer does not match {dimensions:?}"))?;
    image
        .save(&args.output)
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {}", args.output.display()))
}

fn shader(args: ShaderArgs) -> Result<()> {
    let data = std::fs::read(&args.input)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", args.input.display()))?;
    print!("{}", wowdecode::try_disassemble(&data)?);
    Ok(())
}

fn main() -> Result<()> {
    set_up_tracing();

    match Cli::parse().command {
        Command::Texture(args) => texture(args),
        Command::Shader(args) => shader(args),
    }
}
