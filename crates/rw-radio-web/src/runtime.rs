//! The page's selection runtime and its event listeners.

use std::cell::RefCell;
use std::rc::Rc;

use rw_radio_common::{GLOBAL_NAME, RadioButton, SelectionEvent};
use rw_radio_runtime::{DocumentEvent, RuntimeContext, SelectByIdOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, KeyboardEvent};

use crate::document::{WebDocument, WebNode};
use crate::events;

thread_local! {
    static INSTALLED: RefCell<Option<RadioRuntime>> = const { RefCell::new(None) };
}

/// Selection runtime bound to a browser document.
///
/// Clones share one [`RuntimeContext`]. Calls made from a subscriber while
/// a selection is being applied are dropped with a warning.
#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct RadioRuntime {
    context: Rc<RefCell<RuntimeContext<WebDocument>>>,
}

impl RadioRuntime {
    /// Install the controller on `document` and listen for clicks and key
    /// presses on it.
    pub fn attach(document: WebDocument) -> Result<Self, JsValue> {
        let target = document.document().clone();
        let mut context = RuntimeContext::new(document);
        context.install();
        let runtime = Self {
            context: Rc::new(RefCell::new(context)),
        };

        let handle = runtime.clone();
        let on_click = Closure::wrap(Box::new(move |event: Event| {
            handle.dispatch_with(|doc| events::click(doc, &event));
        }) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();

        let handle = runtime.clone();
        let on_key_down = Closure::wrap(Box::new(move |event: Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            handle.dispatch_with(|doc| events::key_down(doc, &event, &key));
        }) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback("keydown", on_key_down.as_ref().unchecked_ref())?;
        on_key_down.forget();

        tracing::debug!("Attached radio runtime listeners");
        Ok(runtime)
    }

    fn with_context<R>(
        &self,
        f: impl FnOnce(&mut RuntimeContext<WebDocument>) -> R,
    ) -> Option<R> {
        if let Ok(mut context) = self.context.try_borrow_mut() {
            Some(f(&mut context))
        } else {
            tracing::warn!("Radio runtime called while a selection is in progress");
            None
        }
    }

    fn dispatch_with(
        &self,
        event: impl FnOnce(&WebDocument) -> Option<DocumentEvent<WebNode>>,
    ) -> usize {
        self.with_context(|context| {
            event(context.document()).map_or(0, |event| context.dispatch(&event))
        })
        .unwrap_or(0)
    }
}

#[wasm_bindgen]
impl RadioRuntime {
    /// Select the option whose header has stable id `id`. Returns the number
    /// of headers that became active.
    #[wasm_bindgen(js_name = selectByStableId)]
    pub fn select_by_stable_id(&self, id: &str, scroll_to_element: bool) -> usize {
        let options = SelectByIdOptions { scroll_to_element };
        self.with_context(|context| context.select_by_stable_id(id, options))
            .unwrap_or(0)
    }

    /// Select `{ group, key }` in every radio list of the group.
    pub fn select(&self, option: JsValue) -> Result<usize, JsError> {
        let option: RadioButton = serde_wasm_bindgen::from_value(option)
            .map_err(|err| JsError::new(&format!("Invalid radio option: {err}")))?;
        Ok(self
            .with_context(|context| context.select(&option))
            .unwrap_or(0))
    }

    /// Call `handler` with `{ radioButton, currentId? }` after every change.
    /// Returns a function that removes the handler.
    pub fn subscribe(&self, handler: js_sys::Function) -> Result<js_sys::Function, JsError> {
        let id = self
            .with_context(|context| context.subscribe(move |event| notify(&handler, event)))
            .ok_or_else(|| JsError::new("Cannot subscribe while a selection is in progress"))?;

        let runtime = self.clone();
        let unsubscribe = Closure::<dyn FnMut()>::new(move || {
            runtime.with_context(|context| context.unsubscribe(id));
        });
        Ok(unsubscribe.into_js_value().unchecked_into())
    }
}

fn notify(handler: &js_sys::Function, event: &SelectionEvent) {
    let payload = match serde_wasm_bindgen::to_value(event) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(%err, "Failed to convert selection event");
            return;
        }
    };
    if let Err(err) = handler.call1(&JsValue::NULL, &payload) {
        tracing::warn!(?err, "Selection handler threw");
    }
}

/// Install the page's runtime once.
///
/// Returns the installed runtime. Returns `None` outside a page, or when
/// another runtime (such as the bundled script) already claimed the page.
#[wasm_bindgen(js_name = installRadioRuntime)]
pub fn install() -> Option<RadioRuntime> {
    if let Some(runtime) = INSTALLED.with_borrow(Clone::clone) {
        return Some(runtime);
    }
    let window = web_sys::window()?;
    let global = JsValue::from_str(GLOBAL_NAME);
    if js_sys::Reflect::has(&window, &global).unwrap_or(false) {
        tracing::debug!("Radio runtime already installed on this page");
        return None;
    }

    let runtime = match WebDocument::current().map(RadioRuntime::attach) {
        Some(Ok(runtime)) => runtime,
        Some(Err(err)) => {
            tracing::warn!(?err, "Failed to attach radio runtime");
            return None;
        }
        None => return None,
    };
    if let Err(err) = js_sys::Reflect::set(&window, &global, &runtime.clone().into()) {
        tracing::warn!(?err, "Failed to publish radio runtime");
    }
    INSTALLED.with_borrow_mut(|slot| *slot = Some(runtime.clone()));
    Some(runtime)
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
#[wasm_bindgen(start)]
pub fn start() {
    install();
}
