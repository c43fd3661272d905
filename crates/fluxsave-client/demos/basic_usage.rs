//! Basic usage example for the Fluxsave storage API
//!
//! This example demonstrates:
//! - Uploading files (single and batched)
//! - Listing files and folders
//! - Building transform URLs
//! - Reading account metrics
//!
//! Run with: cargo run --example basic_usage

use std::path::Path;

use fluxsave_client::{
    Compression, Config, FluxsaveClient, TransformOptions, UploadOptions, ROOT_FOLDER,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("🚀 Fluxsave - Basic Usage Example\n");

    // Create the client; replace with your actual credentials
    let client = FluxsaveClient::new(Config::new(
        "https://api.fluxsave.com",
        "your-api-key",
        "your-api-secret",
    ))?;

    // ==================== Folder Operations ====================

    println!("📁 Creating folder 'photos'...");
    let folder = client.create_folder("photos", None).await?;
    println!("   ✅ Created folder {}", folder.data.id);

    println!("\n📋 Listing all folders...");
    let folders = client.list_folders().await?;
    for folder in &folders.data {
        println!("   - {} ({})", folder.name, folder.id);
    }

    // ==================== File Operations ====================

    println!("\n📤 Uploading 'photo.png'...");
    let uploaded = client
        .upload_file(
            Path::new("photo.png"),
            &UploadOptions::new()
                .with_name("hero")
                .with_compression(Compression::Low)
                .with_folder(&folder.data.id),
        )
        .await?;
    println!("   ✅ Uploaded as {} -> {}", uploaded.data.id, uploaded.data.url);

    println!("\n📤 Uploading a batch in one request...");
    let batch = client
        .upload_files(
            &[Path::new("a.jpg"), Path::new("b.jpg")],
            &UploadOptions::new().with_folder(&folder.data.id),
        )
        .await?;
    println!("   ✅ Uploaded {} files", batch.data.len());

    println!("\n📋 Listing files in the folder...");
    let files = client.list_files(Some(folder.data.id.as_str())).await?;
    for file in &files.data {
        println!("   - {} ({} bytes, {})", file.name, file.size_bytes, file.mime_type);
    }

    println!("\n📋 Listing unfiled files (root sentinel)...");
    let unfiled = client.list_files(Some(ROOT_FOLDER)).await?;
    println!("   {} unfiled files", unfiled.data.len());

    // ==================== Transform URLs ====================

    println!("\n🖼️  Building a delivery URL with transforms...");
    let url = client.file_url(
        &uploaded.data.id,
        &TransformOptions::new()
            .set("width", 800)
            .set("height", 600)
            .set("format", "webp")
            .set("quality", 82),
    );
    println!("   {}", url);

    // ==================== Metrics ====================

    println!("\n📊 Fetching account metrics...");
    let metrics = client.get_metrics().await?;
    println!(
        "   {} files, {} folders, {} bytes used",
        metrics.data.total_files, metrics.data.total_folders, metrics.data.storage_used_bytes
    );

    // ==================== Cleanup ====================

    println!("\n🧹 Cleaning up...");
    for file in files.data {
        client.delete_file(&file.id).await?;
        println!("   Deleted: {}", file.name);
    }
    // Server reparents any remaining files to the root
    client.delete_folder(&folder.data.id).await?;
    println!("   ✅ Folder deleted");

    println!("\n✨ Example completed successfully!");

    Ok(())
}
