use anyhow::{Context, Result};
use logseq_bridge_config::Config;
use logseq_bridge_engine::{HookRegistry, Plugin, PluginSettings, RenderContext, RenderOptions};
use std::{env, fs, path::Path, process};

mod host;

fn plugin_settings(config: &Config) -> PluginSettings {
    PluginSettings {
        render: RenderOptions {
            tasks: config.render.tasks,
            admonitions: config.render.admonitions,
        },
        heading_overlay: config.editor.heading_overlay,
        marker_overlay: config.editor.marker_overlay,
    }
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <render|tokens> <markdown-file>");
    eprintln!("       {program} init");
    eprintln!("  render   print the post-processed HTML of the file");
    eprintln!("  tokens   print the editor overlay tokens of every line");
    eprintln!("  init     write a default config file if none exists");
    process::exit(1);
}

fn init_config() -> Result<()> {
    let config_path = Config::config_path();
    if config_path.exists() {
        println!("Config file already exists at {}", config_path.display());
        return Ok(());
    }
    Config::default()
        .save()
        .with_context(|| format!("Failed to write config file {}", config_path.display()))?;
    log::info!("Created default config file at {}", config_path.display());
    println!("{}", config_path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("logseq-bridge-cli", String::as_str);
    let (command, path) = match args.as_slice() {
        [_, command] if command == "init" => return init_config(),
        [_, command, path] if command == "render" || command == "tokens" => {
            (command.as_str(), Path::new(path))
        }
        _ => usage(program),
    };

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::debug!(
                "No config file at {}, using defaults",
                Config::config_path().display()
            );
            Config::default()
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read markdown file {}", path.display()))?;

    let mut registry = HookRegistry::new();
    let mut plugin = Plugin::new(plugin_settings(&config));
    plugin.on_load(&mut registry);

    if command == "render" {
        let ctx = RenderContext {
            source_path: Some(path.display().to_string()),
        };
        println!("{}", host::render_document(&registry, &source, &ctx));
    } else {
        for row in host::token_rows(&registry, &source) {
            println!("{row}");
        }
    }

    plugin.on_unload(&mut registry);
    Ok(())
}
