use chrono::{DateTime, Local};
use clap::Parser;
use inspection_common::{InspectionBinding, ShapeTemplateStore};
use inspection_visuals::{cli, config, error, loader, scanner, selector};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Inspect { input, shapes, live_shapes, live_dir, json } => {
            let mut paths = loader::TemplatePaths::from_config(&config);
            if let Some(path) = shapes {
                paths.static_shapes = path;
            }
            if let Some(path) = live_shapes {
                paths.live_shapes = path;
            }
            if let Some(dir) = live_dir {
                paths.live_image_dir = dir;
            }

            let binding = loader::load_inspection(&input, &paths)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&binding)?);
            } else {
                println!("🔍 inspection-visuals - 検査結果\n");
                print_binding(&binding);
            }
        }

        Commands::Latest { system, dir } => {
            let folder = dir.unwrap_or_else(|| config.result_dir.clone());
            let latest = scanner::latest_result_file(&folder, &system)?
                .ok_or_else(|| error::InspectionError::NoResultFile(system.clone()))?;

            let created: DateTime<Local> = latest.created.into();
            println!("{}", latest.path.display());
            println!("  作成日時: {}", created.format("%Y-%m-%d %H:%M:%S"));
        }

        Commands::Listen { bind } => {
            let addr = bind.unwrap_or_else(|| config.listen_addr.clone());
            let mailbox = selector::SelectorMailbox::new();
            let listener = selector::SelectorListener::bind(&addr, mailbox)?;
            println!("📡 {} で識別子を待機中 (Ctrl+C で終了)", listener.local_addr()?);
            listener.run();
        }

        Commands::Shapes { file, key } => {
            let store = ShapeTemplateStore::load(&file)?;
            let shapes: Vec<_> = match key.as_deref() {
                Some(key) => store.matching(key).collect(),
                None => store.shapes.iter().collect(),
            };

            println!("{}: {}件", file.display(), shapes.len());
            for shape in shapes {
                println!(
                    "  [{}] {} kind={:?} image={} center=({:.1}, {:.1}) size={:.1}x{:.1}",
                    shape.key, shape.name, shape.shape, shape.image, shape.x, shape.y, shape.width, shape.height
                );
            }
        }

        Commands::Config { show, init } => {
            if init {
                config.save()?;
                println!("✔ 設定を書き出しました: {}", Config::config_path()?.display());
            }

            if show || !init {
                println!("設定: {}", Config::config_path()?.display());
                println!("  待ち受け: {}", config.listen_addr);
                println!("  結果フォルダ: {}", config.result_dir.display());
                println!("  ライブ画像フォルダ: {}", config.live_image_dir().display());
                println!("  静止画テンプレート: {}", config.static_shapes_file.display());
                println!("  ライブ画像テンプレート: {}", config.live_shapes_file.display());
                println!("  フレームレート: {}fps", config.frame_rate);
                println!("  詳細切替間隔: {}フレーム", config.rotate_every_frames);
            }
        }
    }

    Ok(())
}

fn print_binding(binding: &InspectionBinding) {
    println!("描画形状: {}件", binding.shapes_to_draw.len());
    for shape in &binding.shapes_to_draw {
        println!(
            "  [{}] {} image={} color={:?}",
            shape.template.key, shape.template.name, shape.template.image, shape.color
        );
    }

    println!("\n不合格詳細: {}件", binding.failed_inspections.len());
    for failed in &binding.failed_inspections {
        println!("  {} ({})", failed.inspection_name, failed.image_file.display());
        for (key, value) in failed.rows() {
            println!("    {key}: {value}");
        }
    }

    if binding.unmatched_count() > 0 {
        println!("\n未一致キー: {}件", binding.unmatched_count());
        for key in &binding.unmatched_keys {
            println!("  \"{key}\"");
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
