//! autopatch: generate a random VCV Rack patch
//!
//! Places random modules with random parameters, wires them together and
//! writes the result as a `.vcv` patch file.
//!
//! Usage:
//!   autopatch --modules 30 --wires 80 --seed 42 --out random.vcv
//!   autopatch --device "Built-in Output" --version-fundamental 0.6.1

mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use autopatch_core::{Catalog, GenerateOptions, PluginVersions, WriteOptions, generate_seeded};
use chrono::Utc;
use clap::{Arg, ArgMatches, Command, value_parser};
use colored::Colorize;

const DEFAULT_OUT: &str = "out.vcv";

fn default_device() -> &'static str {
    if cfg!(target_os = "windows") {
        "Speakers (Realtek High Definition Audio)"
    } else {
        "default"
    }
}

fn default_seed() -> i64 {
    let now = Utc::now();
    now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp())
}

fn version_flag(plugin: &str) -> String {
    format!("version-{}", plugin.to_lowercase())
}

fn command(versions: &PluginVersions) -> Command {
    let defaults = GenerateOptions::default();
    let mut command = Command::new("autopatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate a random VCV Rack patch")
        .arg(
            Arg::new("modules")
                .long("modules")
                .value_name("N")
                .help("The number of modules to create")
                .default_value(defaults.module_count.to_string())
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("wires")
                .long("wires")
                .value_name("N")
                .help("The maximum number of wires to create between modules")
                .default_value(defaults.wire_count.to_string())
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("The seed to use for the random number generator (default: current time)")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64)),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .value_name("PATH")
                .help("The name of the output VCV file")
                .default_value(DEFAULT_OUT)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("device")
                .long("device")
                .value_name("NAME")
                .help("The audio device to use")
                .default_value(default_device()),
        );

    for (plugin, version) in versions.iter() {
        let flag = version_flag(plugin);
        command = command.arg(
            Arg::new(flag.clone())
                .long(flag)
                .value_name("VERSION")
                .help(format!("The version of the {plugin} plugin"))
                .default_value(version.to_string()),
        );
    }

    command
}

struct Settings {
    generate: GenerateOptions,
    write: WriteOptions,
    seed: i64,
    out: PathBuf,
}

fn settings(matches: &ArgMatches, defaults: &PluginVersions) -> Result<Settings> {
    let module_count = *matches
        .get_one::<usize>("modules")
        .context("missing --modules")?;
    let wire_count = *matches.get_one::<usize>("wires").context("missing --wires")?;
    let seed = matches
        .get_one::<i64>("seed")
        .copied()
        .unwrap_or_else(default_seed);
    let out = matches
        .get_one::<PathBuf>("out")
        .cloned()
        .context("missing --out")?;
    let device = matches
        .get_one::<String>("device")
        .context("missing --device")?;

    let mut write = WriteOptions::new(device.as_str());
    for (plugin, _) in defaults.iter() {
        if let Some(version) = matches.get_one::<String>(&version_flag(plugin)) {
            write.versions.set(plugin, version.as_str());
        }
    }

    Ok(Settings {
        generate: GenerateOptions::new(module_count, wire_count),
        write,
        seed,
        out,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let defaults = PluginVersions::default();
    let matches = command(&defaults).get_matches();
    let settings = settings(&matches, &defaults)?;

    println!("Using seed: {}", settings.seed);

    let catalog = Catalog::standard();
    let patch = generate_seeded(&catalog, &settings.generate, settings.seed)
        .context("Failed to generate patch")?;
    tracing::info!(
        modules = patch.module_count(),
        wires = patch.wire_count(),
        "generated patch"
    );

    output::save_patch(&settings.out, &patch, &catalog, &settings.write)?;

    println!(
        "{}",
        format!("Successfully outputted to {}", settings.out.display()).green()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Settings {
        let defaults = PluginVersions::default();
        let matches = command(&defaults)
            .try_get_matches_from(std::iter::once("autopatch").chain(args.iter().copied()))
            .unwrap();
        settings(&matches, &defaults).unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = parse(&[]);
        assert_eq!(settings.generate, GenerateOptions::default());
        assert_eq!(settings.generate.module_count, 50);
        assert_eq!(settings.generate.wire_count, 100);
        assert_eq!(settings.out, PathBuf::from("out.vcv"));
        assert_eq!(settings.write.device_name, default_device());
        assert_eq!(settings.write.versions, PluginVersions::default());
    }

    #[test]
    fn test_explicit_flags() {
        let settings = parse(&[
            "--modules", "7", "--wires", "3", "--seed", "-12", "--out", "patch.vcv", "--device",
            "Speakers",
        ]);
        assert_eq!(settings.generate.module_count, 7);
        assert_eq!(settings.generate.wire_count, 3);
        assert_eq!(settings.seed, -12);
        assert_eq!(settings.out, PathBuf::from("patch.vcv"));
        assert_eq!(settings.write.device_name, "Speakers");
    }

    #[test]
    fn test_version_overrides() {
        let settings = parse(&["--version-core", "1.1.6", "--version-fundamental", "1.4.0"]);
        assert_eq!(settings.write.versions.core(), "1.1.6");
        assert_eq!(settings.write.versions.get("Fundamental"), Some("1.4.0"));
    }

    #[test]
    fn test_every_plugin_has_version_flag() {
        let defaults = PluginVersions::default();
        let command = command(&defaults);
        for plugin in Catalog::standard().plugins() {
            let flag = version_flag(plugin);
            assert!(
                command.get_arguments().any(|arg| arg.get_id() == flag.as_str()),
                "no flag for {plugin}"
            );
        }
    }

    #[test]
    fn test_rejects_negative_module_count() {
        let defaults = PluginVersions::default();
        let result = command(&defaults).try_get_matches_from(["autopatch", "--modules", "-1"]);
        assert!(result.is_err());
    }
}
