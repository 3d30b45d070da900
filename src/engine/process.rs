//! 有時限的子程序執行
//!
//! 以輪詢 `try_wait` 搭配讀取執行緒的方式執行子程序：
//! stdout/stderr 由獨立執行緒持續汲取，避免管線塞滿讓子程序卡死；
//! 超過時限的子程序會被強制終止。

use log::warn;
use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 子程序的完整輸出
#[derive(Debug)]
pub struct ProcessOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// 執行子程序直到結束或超過時限
///
/// 超時會終止子程序並回傳 `TimedOut` 錯誤。
pub fn run_with_deadline(mut command: Command, deadline: Duration) -> io::Result<ProcessOutput> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn()?;
    let stdout_reader = spawn_reader(child.stdout.take());
    let stderr_reader = spawn_reader(child.stderr.take());

    let started = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if started.elapsed() >= deadline {
            warn!("子程序超過 {} 秒時限，強制終止", deadline.as_secs());
            let _ = child.kill();
            let _ = child.wait();
            join_reader(stdout_reader);
            join_reader(stderr_reader);
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("子程序超過 {} 秒時限", deadline.as_secs()),
            ));
        }
        thread::sleep(POLL_INTERVAL);
    };

    Ok(ProcessOutput {
        success: status.success(),
        stdout: join_reader(stdout_reader),
        stderr: join_reader(stderr_reader),
    })
}

fn spawn_reader<R: Read + Send + 'static>(source: Option<R>) -> Option<thread::JoinHandle<String>> {
    source.map(|mut reader| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = reader.read_to_end(&mut buffer);
            String::from_utf8_lossy(&buffer).into_owned()
        })
    })
}

fn join_reader(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|reader| reader.join().ok())
        .unwrap_or_default()
}
