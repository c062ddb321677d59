//! QR check-in modal
//!
//! The scanner panel is mounted only while the modal is open: mounting
//! acquires the camera, unmounting closes the session and releases it.

use std::time::Duration;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use super::forms::Button;
use super::modal::Modal;
use crate::services::{NoDecoder, QrScanSession, ScanPhase, default_camera};
use crate::utils::timer;

const VIDEO_ELEMENT_ID: &str = "qr-check-in-video";
const SCAN_INTERVAL: Duration = Duration::from_millis(250);

#[component]
pub fn QrCheckInModal(show: bool, onclose: EventHandler<()>, on_code: EventHandler<String>) -> Element {
    rsx! {
        Modal {
            show,
            title: "扫码入住".to_string(),
            onclose: move |_| onclose.call(()),
            ScannerPanel { on_code }
        }
    }
}

#[component]
fn ScannerPanel(on_code: EventHandler<String>) -> Element {
    let mut session = use_signal(QrScanSession::new);
    let mut manual = use_signal(String::new);
    let camera = use_hook(|| default_camera(VIDEO_ELEMENT_ID));

    use_hook(move || {
        let camera = camera.clone();
        // Outlives the panel so that a stream granted after closing is still stopped.
        spawn_forever(async move {
            let Ok(ticket) = session.try_write().map(|mut s| s.begin()) else {
                return;
            };
            let result = camera.acquire().await;
            let phase = match session.try_write() {
                Ok(mut s) => s.attach(ticket, result),
                Err(_) => {
                    if let Ok(mut handle) = result {
                        handle.stop();
                    }
                    return;
                }
            };
            if phase != ScanPhase::Scanning {
                return;
            }

            let mut reader = NoDecoder;
            loop {
                timer::sleep(SCAN_INTERVAL).await;
                let Ok(mut s) = session.try_write() else {
                    break;
                };
                if !s.is_scanning() {
                    break;
                }
                if let Some(code) = s.poll(&mut reader) {
                    drop(s);
                    on_code.call(code);
                    break;
                }
            }
        });
    });

    use_drop(move || {
        if let Ok(mut s) = session.try_write() {
            s.close();
        }
    });

    let (phase, error) = {
        let s = session.read();
        (s.phase(), s.error().map(str::to_owned))
    };
    let status = match phase {
        ScanPhase::Idle | ScanPhase::Acquiring => "正在打开摄像头...",
        ScanPhase::Scanning => "请将预订二维码对准摄像头",
        ScanPhase::Decoded => "已识别",
        ScanPhase::Failed => "摄像头不可用，请手动输入预订编号",
        ScanPhase::Closed => "扫描已结束",
    };

    let mut submit = move || {
        let code = session.write().submit_manual(&manual());
        if let Some(code) = code {
            manual.set(String::new());
            on_code.call(code);
        }
    };

    rsx! {
        div { class: "space-y-4",
            div { class: "relative aspect-video bg-gray-900 rounded-lg overflow-hidden",
                video {
                    id: VIDEO_ELEMENT_ID,
                    class: "w-full h-full object-cover",
                    autoplay: true,
                    muted: true,
                    "playsinline": "true",
                }
                if phase != ScanPhase::Scanning {
                    div { class: "absolute inset-0 flex items-center justify-center text-gray-300 text-sm px-4 text-center",
                        "{status}"
                    }
                }
            }
            p { class: "text-sm text-gray-600", "{status}" }
            if let Some(error) = error {
                p { class: "text-sm text-red-600", "{error}" }
            }

            div { class: "flex items-end space-x-3",
                div { class: "flex-1",
                    label { class: "block text-sm font-medium text-gray-700 mb-1", "预订编号" }
                    input {
                        class: "block w-full rounded-md border border-gray-300 px-3 py-2 text-sm focus:border-teal-500 focus:ring-teal-500",
                        placeholder: "BK-240001",
                        value: "{manual}",
                        oninput: move |evt| manual.set(evt.value()),
                        onkeydown: move |evt: KeyboardEvent| {
                            if evt.key() == Key::Enter {
                                submit();
                            }
                        },
                    }
                }
                Button {
                    disabled: manual().trim().is_empty(),
                    onclick: move |_| submit(),
                    "办理入住"
                }
            }
        }
    }
}
