//! Example: look up a word and print the extracted senses
//!
//! Run with: cargo run -p wordhippo --example lookup -- happy

use wordhippo::Tool;

#[tokio::main]
async fn main() {
    let word = std::env::args().nth(1).unwrap_or_else(|| "happy".to_string());

    let tool = match Tool::builder().build() {
        Ok(tool) => tool,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match tool.lookup(&word).await {
        Ok(response) => {
            println!("URL: {}", response.url);
            println!("Status: {}\n", response.status_code);
            println!("{}", response.text());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
