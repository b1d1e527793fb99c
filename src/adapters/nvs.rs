//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`ConfigPort`] for the Aromatron timer.
//!
//! - Config validation: all fields are range-checked before persistence.
//! - Slots: the settings blob lives under `syscfg`, or `syscfg<offset>` for
//!   a non-zero [`STORAGE_OFFSET`](crate::config::STORAGE_OFFSET).
//! - Atomic writes: ESP-IDF NVS commits are atomic per nvs_commit().

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;
use crate::drivers::ds3231;
use log::info;

#[cfg(feature = "espidf")]
use log::warn;

#[cfg(not(feature = "espidf"))]
use std::collections::HashMap;

#[cfg(feature = "espidf")]
use esp_idf_svc::sys::*;

const CONFIG_NAMESPACE: &str = "aromatron";
const CONFIG_KEY: &str = "syscfg";

/// Largest accepted storage offset (also bounds the key length).
pub const MAX_STORAGE_OFFSET: u16 = 1024;

pub struct NvsAdapter {
    key: heapless::String<15>,
    #[cfg(not(feature = "espidf"))]
    store: std::cell::RefCell<HashMap<String, Vec<u8>>>,
}

impl NvsAdapter {
    /// Create an adapter for settings slot 0 and initialise NVS flash.
    ///
    /// On first boot or after a version mismatch the NVS partition is
    /// erased and re-initialised automatically.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_offset(0)
    }

    /// Create an adapter for the settings slot at `offset`.
    pub fn with_offset(offset: u16) -> Result<Self, ConfigError> {
        if offset > MAX_STORAGE_OFFSET {
            return Err(ConfigError::ValidationFailed(
                "storage offset must be 0–1024",
            ));
        }

        #[cfg(feature = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any concurrent NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                let ret2 = unsafe { nvs_flash_erase() };
                if ret2 != ESP_OK {
                    return Err(ConfigError::IoError);
                }
                let ret3 = unsafe { nvs_flash_init() };
                if ret3 != ESP_OK {
                    return Err(ConfigError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }
            info!("NvsAdapter: ESP-IDF NVS initialised");
        }

        #[cfg(not(feature = "espidf"))]
        info!("NvsAdapter: simulation backend");

        Ok(Self {
            key: slot_key(offset)?,
            #[cfg(not(feature = "espidf"))]
            store: std::cell::RefCell::new(HashMap::new()),
        })
    }

    /// NVS key this adapter reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    #[cfg(not(feature = "espidf"))]
    fn composite_key(&self) -> String {
        format!("{}::{}", CONFIG_NAMESPACE, self.key)
    }

    /// Store raw bytes under this adapter's key, bypassing validation.
    #[cfg(all(test, not(feature = "espidf")))]
    fn put_raw(&self, bytes: &[u8]) {
        self.store
            .borrow_mut()
            .insert(self.composite_key(), bytes.to_vec());
    }

    /// Open an NVS namespace, execute a closure with the handle, then close.
    #[cfg(feature = "espidf")]
    fn with_nvs_handle<F, T>(namespace: &str, write: bool, f: F) -> Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, i32>,
    {
        let ns_buf = nul_terminated(namespace);

        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let ret = unsafe { nvs_open(ns_buf.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }

        let result = f(handle);
        unsafe {
            nvs_close(handle);
        }
        result
    }
}

fn slot_key(offset: u16) -> Result<heapless::String<15>, ConfigError> {
    use core::fmt::Write;

    let mut key = heapless::String::new();
    let res = if offset == 0 {
        key.push_str(CONFIG_KEY).map_err(|_| core::fmt::Error)
    } else {
        write!(key, "{}{}", CONFIG_KEY, offset)
    };
    res.map_err(|_| ConfigError::ValidationFailed("storage key too long"))?;
    Ok(key)
}

/// NVS wants C strings of at most 15 characters plus the terminator.
#[cfg(feature = "espidf")]
fn nul_terminated(s: &str) -> [u8; 16] {
    let mut buf = [0u8; 16];
    let bytes = s.as_bytes();
    let len = bytes.len().min(15);
    buf[..len].copy_from_slice(&bytes[..len]);
    buf
}

fn is_valid_i2c_address(addr: u8) -> bool {
    (0x08..=0x77).contains(&addr)
}

pub(crate) fn validate_config(cfg: &SystemConfig) -> Result<(), ConfigError> {
    if cfg.boot_screen_ms > 10_000 {
        return Err(ConfigError::ValidationFailed(
            "boot_screen_ms must be 0–10000",
        ));
    }
    if !is_valid_i2c_address(cfg.lcd_address) {
        return Err(ConfigError::ValidationFailed(
            "lcd_address must be 0x08–0x77",
        ));
    }
    if cfg.lcd_address == ds3231::ADDRESS {
        return Err(ConfigError::ValidationFailed(
            "lcd_address collides with the RTC",
        ));
    }
    if !(8..=40).contains(&cfg.lcd_columns) {
        return Err(ConfigError::ValidationFailed("lcd_columns must be 8–40"));
    }
    if !(1..=4).contains(&cfg.lcd_rows) {
        return Err(ConfigError::ValidationFailed("lcd_rows must be 1–4"));
    }
    Ok(())
}

impl ConfigPort for NvsAdapter {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        #[cfg(not(feature = "espidf"))]
        {
            match self.store.borrow().get(&self.composite_key()) {
                Some(bytes) => {
                    let cfg: SystemConfig =
                        postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
                    info!("NvsAdapter: loaded config ({} bytes)", bytes.len());
                    Ok(cfg)
                }
                None => {
                    info!("NvsAdapter: no stored config, using defaults");
                    Ok(SystemConfig::default())
                }
            }
        }

        #[cfg(feature = "espidf")]
        {
            let key = nul_terminated(&self.key);
            let result = Self::with_nvs_handle(CONFIG_NAMESPACE, false, |handle| {
                let mut size: usize = 0;
                let ret = unsafe {
                    nvs_get_blob(
                        handle,
                        key.as_ptr() as *const _,
                        core::ptr::null_mut(),
                        &mut size,
                    )
                };
                if ret != ESP_OK {
                    return Err(ret);
                }

                let mut buf = vec![0u8; size];
                let ret = unsafe {
                    nvs_get_blob(
                        handle,
                        key.as_ptr() as *const _,
                        buf.as_mut_ptr() as *mut _,
                        &mut size,
                    )
                };
                if ret != ESP_OK {
                    return Err(ret);
                }

                Ok(buf)
            });

            match result {
                Ok(bytes) => {
                    let cfg: SystemConfig =
                        postcard::from_bytes(&bytes).map_err(|_| ConfigError::Corrupted)?;
                    info!("NvsAdapter: loaded config from NVS ({} bytes)", bytes.len());
                    Ok(cfg)
                }
                Err(e) if e == ESP_ERR_NVS_NOT_FOUND => {
                    info!("NvsAdapter: no stored config, using defaults");
                    Ok(SystemConfig::default())
                }
                Err(e) => {
                    warn!("NvsAdapter: NVS read error {}, using defaults", e);
                    Ok(SystemConfig::default())
                }
            }
        }
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        validate_config(config)?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;

        #[cfg(not(feature = "espidf"))]
        {
            let len = bytes.len();
            self.store.borrow_mut().insert(self.composite_key(), bytes);
            info!("NvsAdapter: config saved (simulation, {} bytes)", len);
            Ok(())
        }

        #[cfg(feature = "espidf")]
        {
            let key = nul_terminated(&self.key);
            let result = Self::with_nvs_handle(CONFIG_NAMESPACE, true, |handle| {
                let ret = unsafe {
                    nvs_set_blob(
                        handle,
                        key.as_ptr() as *const _,
                        bytes.as_ptr() as *const _,
                        bytes.len(),
                    )
                };
                if ret != ESP_OK {
                    return Err(ret);
                }
                let ret = unsafe { nvs_commit(handle) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(())
            });
            match result {
                Ok(()) => {
                    info!("NvsAdapter: config saved to NVS ({} bytes)", bytes.len());
                    Ok(())
                }
                Err(e) => {
                    warn!("NvsAdapter: NVS write error {}", e);
                    Err(ConfigError::IoError)
                }
            }
        }
    }
}
