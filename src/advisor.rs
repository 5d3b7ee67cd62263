//! AI分析連携モジュール
//!
//! 外部AI CLIを呼び出し、スキャンした成分に対する「より安全な代替品」の
//! 提案テキストを取得する。照合エンジンの外側のコラボレータであり、
//! ここでの失敗がスキャン結果を覆い隠すことはない。

use crate::config::Config;
use crate::error::{IngredientAiError, Result};
use tokio::process::Command;

/// 成分リストに対する代替品提案を取得する
pub async fn suggest_alternatives(text: &str, config: &Config, verbose: bool) -> Result<String> {
    let prompt = format!(
        "Given these ingredients:\n{}\nSuggest safer or healthier alternatives \
         for each ingredient and briefly explain why they're better.",
        text
    );

    if verbose {
        println!("  プロンプト長: {} chars", prompt.len());
    }

    let response = run_ai_cli(&config.ai_command, &prompt).await?;

    if verbose {
        let preview: String = response.chars().take(500).collect();
        println!("  レスポンス: {}", preview);
    }

    Ok(response)
}

/// AI CLIを実行してレスポンステキストを取得
async fn run_ai_cli(command: &str, prompt: &str) -> Result<String> {
    // Windowsではcmd /c経由
    #[cfg(windows)]
    let output = Command::new("cmd")
        .args(["/c", command, "-p", prompt, "--output-format", "text"])
        .output()
        .await
        .map_err(|e| IngredientAiError::AiCall(format!("AI CLI実行エラー: {}", e)))?;

    #[cfg(not(windows))]
    let output = Command::new(command)
        .args(["-p", prompt, "--output-format", "text"])
        .output()
        .await
        .map_err(|e| IngredientAiError::AiCall(format!("AI CLI実行エラー: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(IngredientAiError::AiCall(format!(
            "AI CLI failed (code {:?}): {}",
            output.status.code(),
            stderr
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
