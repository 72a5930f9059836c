//! # Replay Review Demo
//!
//! Simulates importing a fighting-game replay into a ring buffer, then
//! reviewing it: scrubbing, splicing in a corrected frame, and keeping only
//! a trailing window.
//!
//! Run with: `cargo run --example replay_review`

use anyhow::Context;
use log::info;

use replay_ring::{ByteRingBuffer, RingConfig, SharedRingBuffer};

/// One frame of inputs for both players.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct FrameRecord {
    frame: u32,
    p1_input: u16,
    p2_input: u16,
}

impl FrameRecord {
    const WIDTH: usize = 8;

    fn to_bytes(self) -> [u8; Self::WIDTH] {
        let mut bytes = [0u8; Self::WIDTH];
        bytes[..4].copy_from_slice(&self.frame.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.p1_input.to_le_bytes());
        bytes[6..].copy_from_slice(&self.p2_input.to_le_bytes());
        bytes
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    replay_ring::init_logging();

    println!("Replay Ring Demo");
    println!();

    // Pretend the replay header announced 600 frames (10 seconds at 60 FPS).
    let announced_frames = 600;
    let config = RingConfig::preallocated(announced_frames);
    println!("Configuration:");
    println!("   Initial slots: {}", config.initial_capacity);
    println!(
        "   Estimated memory: {:.1} KB",
        config.estimated_memory_bytes::<FrameRecord>() as f64 / 1024.0
    );
    println!();

    let timeline = SharedRingBuffer::new(&config).context("building replay timeline")?;

    // Import: the file actually holds a few more frames than announced,
    // which exercises growth.
    for frame in 0..700u32 {
        timeline.push_back(simulated_frame(frame))?;
    }
    info!(
        "Imported {} frames into {} slots",
        timeline.len(),
        timeline.capacity()
    );

    // Review: splice a corrected frame after frame 100, then drop it again.
    let correction = FrameRecord {
        frame: 100,
        p1_input: 0xFFFF,
        p2_input: 0,
    };
    timeline.insert_at(101, correction)?;
    let spliced = timeline.with_read(|ring| ring.peek_at(101).copied());
    println!("Spliced frame: {:?}", spliced);
    timeline.erase_at(101)?;

    // Keep only the last 5 seconds for the clip view.
    timeline.with_write(|ring| ring.truncate_front(ring.len().saturating_sub(300)));
    let window = timeline.snapshot();
    println!(
        "Clip window: frames {} to {} ({} frames)",
        window.first().map(|f| f.frame).unwrap_or_default(),
        window.last().map(|f| f.frame).unwrap_or_default(),
        window.len()
    );

    // Plugins hand over raw records whose width comes from the file header.
    let mut raw = ByteRingBuffer::new(FrameRecord::WIDTH)?;
    for record in &window {
        raw.push_back(&record.to_bytes())?;
    }
    println!(
        "Raw record buffer: {} records of {} bytes in {} slots",
        raw.len(),
        raw.element_size(),
        raw.capacity()
    );

    println!();
    println!("Demo complete!");
    Ok(())
}

/// Creates a simulated frame of inputs.
///
/// In a real import this comes from a decoded replay file.
fn simulated_frame(frame: u32) -> FrameRecord {
    FrameRecord {
        frame,
        p1_input: (frame % 16) as u16,
        p2_input: ((frame / 4) % 16) as u16,
    }
}
