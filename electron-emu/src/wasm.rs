//! WebAssembly bindings for the Electron emulator.
//!
//! The browser drives the machine one field at a time with `run_frame` and
//! paints the latest frame from `frame_rgba`. Key events are passed as
//! `KeyboardEvent.code` strings.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::system::{map_browser_key, Electron};
use crate::{ElectronPorts, Image, FRAME_CYCLES};

/// WASM wrapper for the Electron.
#[wasm_bindgen]
pub struct ElectronEmulator {
    system: Electron,
    frame: Arc<Mutex<Option<Image>>>,
    speaker_hz: Arc<AtomicU32>,
    caps_lock: Arc<AtomicBool>,
    halted: bool,
}

#[wasm_bindgen]
impl ElectronEmulator {
    /// Creates an emulator from a 16 KiB OS ROM.
    #[wasm_bindgen(constructor)]
    pub fn new(os_rom: &[u8]) -> Result<ElectronEmulator, JsValue> {
        let frame = Arc::new(Mutex::new(None));
        let speaker_hz = Arc::new(AtomicU32::new(0));
        let caps_lock = Arc::new(AtomicBool::new(false));

        let frame_sink = Arc::clone(&frame);
        let speaker_sink = Arc::clone(&speaker_hz);
        let caps_sink = Arc::clone(&caps_lock);
        let ports = ElectronPorts::new()
            .with_trace(|msg| console::log_1(&JsValue::from_str(msg.trim_end())))
            .with_frame_completed(move |image| {
                if let Ok(mut slot) = frame_sink.lock() {
                    *slot = Some(image);
                }
            })
            .with_speaker(move |hz| speaker_sink.store(hz, Ordering::Relaxed))
            .with_caps_lock(move |on| caps_sink.store(on, Ordering::Relaxed));

        let system = Electron::new(os_rom, ports).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            system,
            frame,
            speaker_hz,
            caps_lock,
            halted: false,
        })
    }

    /// Installs a sideways ROM. Returns false if the bank or size is invalid.
    #[wasm_bindgen]
    pub fn install_rom(&mut self, bank: usize, data: &[u8]) -> bool {
        match self.system.install_rom(bank, data.to_vec()) {
            Ok(()) => true,
            Err(e) => {
                console::error_1(&JsValue::from_str(&e.to_string()));
                false
            }
        }
    }

    /// Power-on reset.
    #[wasm_bindgen]
    pub fn restart(&mut self) {
        self.halted = false;
        self.system.restart();
    }

    /// The BREAK key.
    #[wasm_bindgen]
    pub fn press_break(&mut self) {
        self.halted = false;
        self.system.press_break();
    }

    /// Runs one field's worth of cycles. Returns false once the CPU has hit
    /// an invalid opcode; the machine stays halted until a reset.
    #[wasm_bindgen]
    pub fn run_frame(&mut self) -> bool {
        if self.halted {
            return false;
        }
        if let Err(e) = self.system.run_for_cycles(FRAME_CYCLES) {
            let pc = self.system.cpu().pc();
            console::error_1(&JsValue::from_str(&format!("{} at {:04X}", e, pc)));
            self.halted = true;
        }
        !self.halted
    }

    /// The most recent frame as RGBA bytes, or an empty array before the
    /// first frame.
    #[wasm_bindgen]
    pub fn frame_rgba(&self) -> Uint8Array {
        match self.frame.lock() {
            Ok(slot) => match slot.as_ref() {
                Some(image) => Uint8Array::from(image.to_rgba_bytes().as_slice()),
                None => Uint8Array::new_with_length(0),
            },
            Err(_) => Uint8Array::new_with_length(0),
        }
    }

    #[wasm_bindgen]
    pub fn frame_width(&self) -> u32 {
        self.frame_dimension(Image::width)
    }

    #[wasm_bindgen]
    pub fn frame_height(&self) -> u32 {
        self.frame_dimension(Image::height)
    }

    /// Current speaker tone in Hz, 0 when silent.
    #[wasm_bindgen]
    pub fn speaker_hz(&self) -> u32 {
        self.speaker_hz.load(Ordering::Relaxed)
    }

    #[wasm_bindgen]
    pub fn caps_lock(&self) -> bool {
        self.caps_lock.load(Ordering::Relaxed)
    }

    /// Presses a key by browser `KeyboardEvent.code`. Returns false for
    /// keys the Electron does not have, so the page can let them through.
    #[wasm_bindgen]
    pub fn key_down(&mut self, code: &str) -> bool {
        map_browser_key(code)
            .map(|key| self.system.key_down(key))
            .is_some()
    }

    #[wasm_bindgen]
    pub fn key_up(&mut self, code: &str) -> bool {
        map_browser_key(code)
            .map(|key| self.system.key_up(key))
            .is_some()
    }

    #[wasm_bindgen]
    pub fn release_all_keys(&mut self) {
        self.system.release_all_keys();
    }

    #[wasm_bindgen]
    pub fn peek(&self, addr: u16) -> u8 {
        self.system.read_memory(addr)
    }

    #[wasm_bindgen]
    pub fn poke(&mut self, addr: u16, value: u8) {
        self.system.write_memory(addr, value);
    }

    #[wasm_bindgen]
    pub fn pc(&self) -> u16 {
        self.system.cpu().pc()
    }

    /// Emulated seconds since power-on, for pacing against the wall clock.
    #[wasm_bindgen]
    pub fn emulated_seconds(&self) -> f64 {
        self.system.emulated_time().as_secs_f64()
    }
}

impl ElectronEmulator {
    fn frame_dimension(&self, dimension: fn(&Image) -> usize) -> u32 {
        self.frame
            .lock()
            .ok()
            .and_then(|slot| slot.as_ref().map(dimension))
            .unwrap_or(0) as u32
    }
}
