// This file is part of Field Scenes.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use anyhow::Result;
use bevy::prelude::*;
use clap::Parser;

use field_scenes::{SceneConfig, SceneKind, ScenePlugin};

#[derive(Parser, Debug)]
#[command(name = "field_scenes", version, about = "Radial force field physics scenes")]
struct Cli {
    /// Scene to run
    #[arg(long, short, value_enum, default_value_t = SceneKind::Spheres)]
    scene: SceneKind,
    /// Extra RON overlays applied after assets/config/<scene>.ron (repeatable)
    #[arg(long = "config", short = 'c')]
    configs: Vec<PathBuf>,
    /// Seed for randomly spread body positions
    #[arg(long)]
    seed: Option<u64>,
    /// Exit after this many seconds
    #[arg(long)]
    auto_close: Option<f32>,
    /// List available scenes and exit
    #[arg(long, short)]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list {
        println!("Available scenes:");
        for kind in SceneKind::ALL {
            println!("  {:10} - {}", kind.name(), kind.description());
        }
        return Ok(());
    }

    let cfg = resolve_config(&cli)?;
    let window_cfg = cfg.window.clone();

    App::new()
        .insert_resource(cfg)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: window_cfg.title,
                resolution: (window_cfg.width, window_cfg.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ScenePlugin)
        .run();
    Ok(())
}

/// Preset for the chosen scene, layered with the conventional file (if present)
/// and any `--config` overlays, then CLI overrides.
fn resolve_config(cli: &Cli) -> Result<SceneConfig> {
    let mut layers: Vec<PathBuf> = Vec::new();
    let default_path = cli.scene.config_path();
    if Path::new(&default_path).exists() {
        layers.push(default_path.into());
    }
    for path in &cli.configs {
        if !path.exists() {
            anyhow::bail!("config overlay {} does not exist", path.display());
        }
        layers.push(path.clone());
    }

    let (mut cfg, used, errors) = SceneConfig::load_layered(cli.scene.preset(), &layers);
    // Logging is not initialized before DefaultPlugins; report on stderr.
    for path in &used {
        eprintln!("config: loaded {path}");
    }
    for err in &errors {
        eprintln!("config error: {err}");
    }
    if let Some(seed) = cli.seed {
        cfg.bodies.seed = Some(seed);
    }
    if let Some(secs) = cli.auto_close {
        cfg.window.auto_close = secs;
    }
    Ok(cfg)
}
