//! Interactive terminal for the carbon-accounting advisor.

use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use fernbrom::carbon::CarbonAdvisor;
use fernbrom::config::Config;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;

#[derive(Debug, Parser)]
#[command(name = "carbon-helper", about = "Ask the carbon-accounting advisor")]
struct Args {
    /// Ask once and exit instead of starting the prompt loop.
    question: Option<String>,
}

fn is_exit(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "exit" | "quit")
}

fn format_answer(answer: &str) -> String {
    format!("\n[建議]\n {answer} \n")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    let config = Config::new();
    let advisor = CarbonAdvisor::new(&config.deepseek_api_url, config.deepseek_api_key)?;

    if let Some(question) = args.question {
        println!("{}", format_answer(&advisor.ask(&question).await));
        return Ok(());
    }

    println!("碳盤查小幫手 CLI 測試");
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout
            .write_all("請輸入企業碳盤查問題 (exit 離開): ".as_bytes())
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if is_exit(question) {
            break;
        }
        if question.is_empty() {
            continue;
        }
        println!("{}", format_answer(&advisor.ask(question).await));
    }
    Ok(())
}
