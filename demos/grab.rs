// Grab one frame of the virtual screen and save it as a PNG

use vscreen::{capture, CapturedImage, ScreenCapturer};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    println!("=== Virtual Screen Capture Test ===\n");

    // Test 1: Query geometry
    println!("Test 1: Querying virtual-screen geometry...");
    let geometry = ScreenCapturer::new().geometry();
    println!(
        "✓ Virtual screen: {}x{} at ({}, {})\n",
        geometry.width, geometry.height, geometry.x, geometry.y
    );

    // Test 2: Capture a frame
    println!("Test 2: Capturing virtual screen...");
    match capture() {
        Ok(image) => {
            println!("✓ Successfully captured frame:");
            println!("    Timestamp: {}", image.timestamp);
            println!("    Resolution: {}x{}", image.width, image.height);
            println!("    Data size: {} bytes", image.data.len());

            // Test 3: Save frame as PNG
            println!("\nTest 3: Saving frame as PNG...");
            if let Err(e) = save_as_png(image, "grab.png") {
                println!("✗ Failed to save PNG: {}", e);
            } else {
                println!("✓ Saved to grab.png");
            }
        }
        Err(e) => {
            println!("✗ Failed to capture frame: {}", e);
        }
    }
}

fn save_as_png(image: CapturedImage, path: &str) -> Result<(), String> {
    let rgba = image
        .into_rgba_image()
        .ok_or_else(|| "captured buffer does not match its dimensions".to_string())?;
    rgba.save(path).map_err(|e| e.to_string())
}
