//! Folio service command-line client
//!
//! # Usage
//!
//! ```bash
//! # Health check
//! cargo run -p folio-service --bin folio-client -- health
//!
//! # Render a saved report to HTML locally and convert it through the service
//! cargo run -p folio-service --bin folio-client -- export report.json
//!
//! # Tag a photo against a section heading
//! cargo run -p folio-service --bin folio-client -- tag roof.jpg --heading "Roof Coverings"
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Parser, Subcommand};
use folio::editor::WorkspaceDocument;
use folio::render_core::{ExportRequest, HtmlOptions};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::multipart::Form;
use reqwest::Client;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "folio-client")]
#[command(about = "Folio service client")]
struct Cli {
    /// API base URL
    #[arg(long, default_value = "http://localhost:3000", env = "FOLIO_API_BASE")]
    api_base: String,

    /// Output directory for generated PDFs
    #[arg(long, default_value = "./folio-output", env = "FOLIO_OUTPUT_DIR")]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run health check
    Health,

    /// Export a saved report (`{"header": ..., "pages": [...]}`) to PDF
    Export {
        report: PathBuf,
    },

    /// Ask the service to tag an image file
    Tag {
        image: PathBuf,

        /// Section heading the photo belongs to
        #[arg(long)]
        heading: Option<String>,

        #[arg(long)]
        document_type: Option<String>,
    },

    /// Print a workspace's photo library
    Photos {
        #[arg(default_value = "default")]
        workspace: String,
    },
}

struct FolioClient {
    client: Client,
    api_base: String,
    output_dir: PathBuf,
}

impl FolioClient {
    fn new(api_base: String, output_dir: PathBuf) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(120)).build()?;
        Ok(Self {
            client,
            api_base,
            output_dir,
        })
    }

    async fn health_check(&self) -> anyhow::Result<bool> {
        println!("[INFO] Testing health endpoint...");

        let response = self
            .client
            .get(format!("{}/health", self.api_base))
            .send()
            .await?;

        if response.status().is_success() {
            let body: Value = response.json().await?;
            println!("[INFO] Health check passed: {}", body);
            Ok(true)
        } else {
            println!(
                "[ERROR] Health check failed (HTTP {}): {}",
                response.status(),
                response.text().await?
            );
            Ok(false)
        }
    }

    async fn export(&self, report: &Path) -> anyhow::Result<bool> {
        let document: WorkspaceDocument = serde_json::from_str(&fs::read_to_string(report)?)?;
        let request = ExportRequest::for_report(
            &document.header,
            document.pages.pages(),
            &HtmlOptions::default(),
        )?;
        println!(
            "[INFO] Exporting {} pages as '{}'...",
            document.pages.len(),
            request.filename
        );

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
        spinner.set_message("Converting...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let form = Form::new()
            .text("html", request.html.clone())
            .text("filename", request.filename.clone())
            .text("isMultiPage", request.is_multi_page.to_string());
        let response = self
            .client
            .post(format!("{}/api/generate-pdf", self.api_base))
            .multipart(form)
            .send()
            .await?;
        spinner.finish_and_clear();

        if !response.status().is_success() {
            println!(
                "[ERROR] Export failed (HTTP {}): {}",
                response.status(),
                response.text().await?
            );
            return Ok(false);
        }

        let degraded = response
            .headers()
            .get("x-folio-degraded")
            .is_some_and(|v| v == "true");
        let bytes = response.bytes().await?;
        fs::create_dir_all(&self.output_dir)?;
        let output_file = self.output_dir.join(&request.filename);
        fs::write(&output_file, &bytes)?;

        if degraded {
            println!(
                "[WARN] Conversion service unavailable, wrote fallback PDF: {}",
                output_file.display()
            );
        } else {
            println!(
                "[INFO] Export succeeded: {} ({} bytes)",
                output_file.display(),
                bytes.len()
            );
        }
        Ok(true)
    }

    async fn tag(
        &self,
        image: &Path,
        heading: Option<String>,
        document_type: Option<String>,
    ) -> anyhow::Result<bool> {
        let mime = match image.extension().and_then(|e| e.to_str()) {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            _ => "image/jpeg",
        };
        let data_url = format!("data:{};base64,{}", mime, STANDARD.encode(fs::read(image)?));

        let response = self
            .client
            .post(format!("{}/api/tag-image", self.api_base))
            .json(&json!({
                "imageData": data_url,
                "headingContext": heading,
                "documentType": document_type,
            }))
            .send()
            .await?;

        if response.status().is_success() {
            let body: Value = response.json().await?;
            println!("[INFO] Tags: {}", body["tags"]);
            Ok(true)
        } else {
            println!(
                "[ERROR] Tagging failed (HTTP {}): {}",
                response.status(),
                response.text().await?
            );
            Ok(false)
        }
    }

    async fn photos(&self, workspace: &str) -> anyhow::Result<bool> {
        let response = self
            .client
            .get(format!("{}/api/photos/{}", self.api_base, workspace))
            .send()
            .await?;
        if !response.status().is_success() {
            println!("[ERROR] Could not load photos (HTTP {})", response.status());
            return Ok(false);
        }
        let photos: Vec<Value> = response.json().await?;
        for photo in &photos {
            println!(
                "{:<24} {:<28} {}",
                photo["id"].as_str().unwrap_or("?"),
                photo["displayName"].as_str().unwrap_or(""),
                photo["tags"]
            );
        }
        println!("[INFO] {} photos in workspace '{}'", photos.len(), workspace);
        Ok(true)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = FolioClient::new(cli.api_base, cli.output_dir)?;

    let ok = match cli.command {
        Commands::Health => client.health_check().await?,
        Commands::Export { report } => client.export(&report).await?,
        Commands::Tag {
            image,
            heading,
            document_type,
        } => client.tag(&image, heading, document_type).await?,
        Commands::Photos { workspace } => client.photos(&workspace).await?,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
