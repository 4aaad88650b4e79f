//! Build script for the Glimpse Tauri app.

fn main() {
    tauri_build::build();
}
