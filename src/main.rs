use clap::Parser;
use ingredient_ai_rust::{advisor, cli, config, dictionary, error, history, matcher, report};
use cli::{Cli, Commands, ReportFormat};
use config::Config;
use error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Scan {
            input,
            text,
            dictionary: dictionary_path,
            allergy,
            output,
            format,
            edit,
            no_history,
            ai,
        } => {
            println!("🔬 ingredient-ai - 成分スキャン\n");

            // 1. スキャンテキスト取得
            let mut raw_text = match (&input, &text) {
                (Some(path), _) => {
                    if !path.exists() {
                        return Err(error::IngredientAiError::FileNotFound(
                            path.display().to_string(),
                        ));
                    }
                    std::fs::read_to_string(path)?
                }
                (None, Some(t)) => t.clone(),
                (None, None) => return Err(error::IngredientAiError::NoText),
            };

            // 2. 対話修正（OCR誤読の手直し）
            if edit {
                raw_text = edit_text_interactive(&raw_text)?;
            }

            // 3. 成分辞書読み込み
            println!("[1/3] 成分辞書を読み込み中...");
            let dict = match dictionary_path.or_else(|| config.dictionary_path.clone()) {
                Some(path) => dictionary::Dictionary::load(&path)?,
                None => {
                    eprintln!("  辞書が未指定のため空辞書で続行します（検出は常に0件）");
                    dictionary::Dictionary::default()
                }
            };
            println!("✔ {}件の成分を読み込み\n", dict.len());

            // 4. 照合
            println!("[2/3] 照合中...");
            let matcher = matcher::IngredientMatcher::new(&dict);
            let result = matcher.scan(&raw_text, &allergy);
            let records = matcher.matched_records(&result);
            let scan_report = report::build_report(&records, &result.allergy_alerts);
            println!("✔ 照合完了\n");

            // 5. レポート出力
            println!("[3/3] レポート生成中...\n");
            match format {
                ReportFormat::Text => print!("{}", report::render_text(&scan_report)),
                ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&scan_report)?),
                ReportFormat::Both => {
                    print!("{}", report::render_text(&scan_report));
                    println!("{}", serde_json::to_string_pretty(&scan_report)?);
                }
            }

            if let Some(output_path) = output {
                let json = serde_json::to_string_pretty(&scan_report)?;
                std::fs::write(&output_path, json)?;
                println!("\n✔ レポートを保存: {}", output_path.display());
            }

            // 6. 履歴保存
            if !no_history {
                let history_path = history::HistoryFile::default_path()?;
                let mut scan_history = history::HistoryFile::load(&history_path);
                scan_history.push(
                    &raw_text,
                    result.allergy_alerts.clone(),
                    result.matched_ids.clone(),
                    config.history_limit,
                );
                scan_history.save(&history_path)?;
                if cli.verbose {
                    println!("✔ 履歴に保存: {}", history_path.display());
                }
            }

            // 7. AI代替品提案（失敗してもスキャン結果は有効）
            if ai {
                println!("\n🧠 AI分析中...");
                match advisor::suggest_alternatives(&raw_text, &config, cli.verbose).await {
                    Ok(suggestion) => println!("{}", suggestion),
                    Err(e) => eprintln!("AI分析に失敗: {}", e),
                }
            }

            println!("\n✅ スキャン完了");
        }

        Commands::History { clear, limit } => {
            let history_path = history::HistoryFile::default_path()?;

            if clear {
                match history::HistoryFile::clear(&history_path) {
                    Ok(true) => println!("✔ 履歴を削除しました: {}", history_path.display()),
                    Ok(false) => println!("履歴ファイルが存在しません"),
                    Err(e) => println!("履歴削除エラー: {}", e),
                }
            } else {
                let scan_history = history::HistoryFile::load(&history_path);
                if scan_history.is_empty() {
                    println!("履歴がありません");
                } else {
                    println!("📋 スキャン履歴（新しい順、{}件まで表示）\n", limit);
                    for entry in scan_history.entries().iter().take(limit) {
                        let preview: String = entry.ingredients.chars().take(60).collect();
                        println!("[{}] {}", entry.timestamp, preview);
                        if !entry.harmful_notes.is_empty() {
                            println!("  ⚠️ 有害成分: {}", entry.harmful_notes.join(", "));
                        }
                        if !entry.allergies_found.is_empty() {
                            println!("  ⚠️ アレルギー: {}", entry.allergies_found.join(", "));
                        }
                    }
                    println!("\n計{}件", scan_history.len());
                }
            }
        }

        Commands::Config { set_dictionary, show } => {
            let mut config = config;

            if let Some(path) = set_dictionary {
                config.set_dictionary_path(path)?;
                println!("✔ 成分辞書のパスを設定しました");
            }

            if show {
                println!("設定:");
                println!(
                    "  成分辞書: {}",
                    config
                        .dictionary_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                );
                println!("  履歴保持件数: {}", config.history_limit);
                println!("  AIコマンド: {}", config.ai_command);
            }
        }
    }

    Ok(())
}

/// 照合前にテキストを対話的に修正する
fn edit_text_interactive(text: &str) -> Result<String> {
    println!("✏️ エディタでテキストを修正してください");
    match dialoguer::Editor::new().edit(text) {
        Ok(Some(edited)) => Ok(edited),
        Ok(None) => Ok(text.to_string()),
        Err(e) => Err(error::IngredientAiError::Config(format!(
            "エディタ起動エラー: {}",
            e
        ))),
    }
}
