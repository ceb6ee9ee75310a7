use std::ffi::CStr;
use std::mem;
use std::ptr;

pub fn getuid() -> u32 {
    unsafe {
        libc::getuid() as u32
    }
}

/// Best-effort resolution of a numeric uid to a login name.
pub fn username(uid: u32) -> Option<String> {
    let mut buf: Vec<libc::c_char> = vec![0; 1024];
    let mut pwd: libc::passwd = unsafe { mem::zeroed() };
    let mut entry = ptr::null_mut();

    loop {
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut entry)
        };

        match rc {
            0 if entry.is_null()              => return None,
            0                                 => break,
            libc::ERANGE if buf.len() < 65536 => buf.resize(buf.len() * 2, 0),
            _                                 => return None,
        }
    }

    if pwd.pw_name.is_null() {
        return None;
    }

    let name = unsafe { CStr::from_ptr(pwd.pw_name) };
    Some(name.to_string_lossy().into_owned())
}
