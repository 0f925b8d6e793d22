use clap::{Parser, Subcommand};
use reqwest::Method;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "webhook-cli")]
#[command(about = "Send test calls to the webhook ingestion server", long_about = None)]
struct Cli {
    #[arg(short, long, env = "WEBHOOK_URL", default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the server's endpoint overview
    Info,
    /// Check liveness and uptime
    Status,
    /// Simulate a sipgate call event
    Sipgate {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        direction: Option<String>,
    },
    /// Simulate a WhatsApp message
    Whatsapp {
        #[arg(long)]
        from: String,
        #[arg(long)]
        message: String,
    },
    /// Post a payload to the test endpoint
    Test {
        /// JSON payload
        #[arg(long, default_value = "{}")]
        data: String,
    },
    /// Send an arbitrary request
    Send {
        #[arg(short = 'X', long, default_value = "POST")]
        method: String,
        path: String,
        /// JSON payload
        #[arg(long)]
        data: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let (method, path, body) = match cli.command {
        Commands::Info => (Method::GET, "/".to_string(), None),
        Commands::Status => (Method::GET, "/status".to_string(), None),
        Commands::Sipgate { from, to, direction } => {
            let mut payload = json!({ "from": from, "to": to });
            if let Some(direction) = direction {
                payload["direction"] = Value::String(direction);
            }
            (Method::POST, "/webhook/sipgate".to_string(), Some(payload))
        }
        Commands::Whatsapp { from, message } => (
            Method::POST,
            "/webhook/whatsapp".to_string(),
            Some(json!({ "from": from, "message": message })),
        ),
        Commands::Test { data } => (Method::POST, "/test".to_string(), Some(serde_json::from_str::<Value>(&data)?)),
        Commands::Send { method, path, data } => {
            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;
            let body = data.as_deref().map(serde_json::from_str::<Value>).transpose()?;
            (method, path, body)
        }
    };

    let mut request = client.request(method, format!("{}{}", base, path));
    if let Some(body) = body {
        request = request.json(&body);
    }
    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
