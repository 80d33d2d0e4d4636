//! Frame timing: one frame-completed event and one DISPLAY END per field.

use std::sync::{Arc, Mutex};

use electron_emu::{Electron, ElectronPorts, Image, FRAME_CYCLES, ROM_SIZE};

/// OS ROM whose reset handler spins on `JMP $C000`.
fn spinning_os() -> Vec<u8> {
    let mut os = vec![0u8; ROM_SIZE];
    os[..3].copy_from_slice(&[0x4C, 0x00, 0xC0]);
    os[0x3FFC..].copy_from_slice(&[0x00, 0xC0, 0x00, 0xC0]);
    os
}

fn setup() -> (Electron, Arc<Mutex<Vec<Image>>>) {
    let frames = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&frames);
    let ports = ElectronPorts::new().with_frame_completed(move |image| {
        sink.lock().unwrap().push(image);
    });
    let electron = Electron::new(&spinning_os(), ports).unwrap();
    (electron, frames)
}

#[test]
fn test_n_fields_produce_n_frames() {
    for n in [1u64, 2, 5] {
        let (mut electron, frames) = setup();
        let mut seen = 0;

        while electron.cycles() <= n * FRAME_CYCLES {
            electron.step().unwrap();

            let count = frames.lock().unwrap().len();
            if count != seen {
                assert_eq!(count, seen + 1);
                assert_eq!(
                    electron.ula().irq_status() & 0x04,
                    0x04,
                    "DISPLAY END set after frame {}",
                    count
                );
                electron.write_memory(0xFE05, 0x10);
                seen = count;
            }
        }

        assert_eq!(seen as u64, n);
    }
}

#[test]
fn test_frames_have_mode_geometry() {
    let (mut electron, frames) = setup();

    electron.write_memory(0xFE07, 0x08); // mode 1
    electron.run_for_cycles(FRAME_CYCLES + 10).unwrap();
    electron.write_memory(0xFE07, 0x10); // mode 2
    electron.run_for_cycles(FRAME_CYCLES).unwrap();

    let frames = frames.lock().unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!((frames[0].width(), frames[0].height()), (320, 256));
    assert_eq!((frames[1].width(), frames[1].height()), (160, 256));
}

#[test]
fn test_frame_shows_screen_memory() {
    let (mut electron, frames) = setup();

    electron.write_memory(0xFE02, 0x00);
    electron.write_memory(0xFE03, 0x2C); // screen at $5800
    electron.write_memory(0xFE07, 0x20); // mode 4
    electron.write_memory(0xFE08, 0x10);
    electron.write_memory(0xFE09, 0x11); // colour 0 black, colour 1 white
    electron.write_memory(0x5800, 0x81);
    electron.write_memory(0x5808, 0xFF);

    electron.run_for_cycles(FRAME_CYCLES + 10).unwrap();

    let frames = frames.lock().unwrap();
    let frame = &frames[0];
    assert_eq!(frame.get(0, 0), 0xFFFFFF);
    assert_eq!(frame.get(1, 0), 0x000000);
    assert_eq!(frame.get(7, 0), 0xFFFFFF);
    assert!((8..16).all(|x| frame.get(x, 0) == 0xFFFFFF));
    assert_eq!(frame.get(0, 1), 0x000000);
}

#[test]
fn test_mode_7_raises_display_end_without_a_frame() {
    let (mut electron, frames) = setup();
    electron.write_memory(0xFE07, 0x38);

    electron.run_for_cycles(FRAME_CYCLES + 10).unwrap();

    assert!(frames.lock().unwrap().is_empty());
    assert_eq!(electron.ula().irq_status() & 0x04, 0x04);
    assert_eq!(electron.ula().video_cycles(), 0);
}

#[test]
fn test_video_cycles_accumulate_per_mode() {
    let (mut electron, _frames) = setup();
    electron.write_memory(0xFE07, 0x30); // mode 6

    electron.run_for_cycles(2 * FRAME_CYCLES + 10).unwrap();

    assert_eq!(electron.ula().video_cycles(), 2 * 40 * 8 * 25 * 2);
}

#[test]
fn test_no_frame_sink_still_schedules_fields() {
    let mut electron = Electron::new(&spinning_os(), ElectronPorts::new()).unwrap();
    electron.run_for_cycles(3 * FRAME_CYCLES + 10).unwrap();

    assert_eq!(electron.ula().next_frame_cycle(), 4 * FRAME_CYCLES);
    assert_eq!(electron.ula().irq_status() & 0x04, 0x04);
}
