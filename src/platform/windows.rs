use ::windows::Win32::System::Threading::{GetCurrentProcess, SetPriorityClass, HIGH_PRIORITY_CLASS};
use tracing::info;

use crate::error::{KeyTaskError, Result};

pub fn set_high_priority() -> Result<()> {
    unsafe { SetPriorityClass(GetCurrentProcess(), HIGH_PRIORITY_CLASS) }
        .map_err(|e| KeyTaskError::Priority(e.to_string()))?;
    info!("process priority raised to high");
    Ok(())
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

pub mod autostart {
    use ::windows::core::PCWSTR;
    use ::windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, WIN32_ERROR};
    use ::windows::Win32::System::Registry::{
        RegCloseKey, RegDeleteValueW, RegOpenKeyExW, RegQueryValueExW, RegSetValueExW, HKEY,
        HKEY_CURRENT_USER, KEY_READ, KEY_SET_VALUE, REG_SAM_FLAGS, REG_SZ,
    };
    use tracing::{info, warn};

    use super::wide;
    use crate::error::{KeyTaskError, Result};
    use crate::platform::{autostart_command, AUTOSTART_NAME, RUN_KEY};

    /// Open run key, closed on drop.
    struct RunKey(HKEY);

    impl RunKey {
        fn open(access: REG_SAM_FLAGS) -> Result<Self> {
            let path = wide(RUN_KEY);
            let mut hkey = HKEY::default();
            let status = unsafe {
                RegOpenKeyExW(HKEY_CURRENT_USER, PCWSTR(path.as_ptr()), 0, access, &mut hkey)
            };
            check(status, "open run key")?;
            Ok(Self(hkey))
        }
    }

    impl Drop for RunKey {
        fn drop(&mut self) {
            let _ = unsafe { RegCloseKey(self.0) };
        }
    }

    fn check(status: WIN32_ERROR, action: &str) -> Result<()> {
        if status.is_err() {
            return Err(KeyTaskError::Registry(format!(
                "{action} failed with code {}",
                status.0
            )));
        }
        Ok(())
    }

    pub fn is_enabled() -> bool {
        let key = match RunKey::open(KEY_READ) {
            Ok(key) => key,
            Err(e) => {
                warn!("{}", e);
                return false;
            }
        };
        let name = wide(AUTOSTART_NAME);
        let status = unsafe {
            RegQueryValueExW(key.0, PCWSTR(name.as_ptr()), None, None, None, None)
        };
        status.is_ok()
    }

    pub fn set_enabled(enable: bool) -> Result<()> {
        let key = RunKey::open(KEY_SET_VALUE)?;
        let name = wide(AUTOSTART_NAME);

        if enable {
            let exe = std::env::current_exe()?;
            let value = wide(&autostart_command(&exe));
            let bytes: Vec<u8> = value.iter().flat_map(|unit| unit.to_le_bytes()).collect();
            let status =
                unsafe { RegSetValueExW(key.0, PCWSTR(name.as_ptr()), 0, REG_SZ, Some(&bytes)) };
            check(status, "write autostart entry")?;
            info!("autostart enabled for {:?}", exe);
        } else {
            let status = unsafe { RegDeleteValueW(key.0, PCWSTR(name.as_ptr())) };
            if status != ERROR_FILE_NOT_FOUND {
                check(status, "remove autostart entry")?;
            }
            info!("autostart disabled");
        }
        Ok(())
    }
}
