//! Browser glue for the lookup page.
//!
//! Wires the search box and subscription form to the endpoints named in the
//! page's `#aqi-config` JSON (or the defaults), and renders result cards.
//! All page state is held in `Page`; nothing is read from globals after
//! start-up except the cookie string, which is read when a form is submitted.
use std::{cell::RefCell, rc::Rc};

use chrono::Local;
use console::MakeConsoleWriter;
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, Headers, HtmlDocument, HtmlElement, HtmlInputElement,
    KeyboardEvent, Node, RequestInit, Response, Window,
};

use crate::{
    atmosphere::AqiResponse,
    config::ClientConfig,
    search::{search_outcome, CityQuery, SearchOutcome},
    subscribe::{validate_email, SubscribeOutcome, SubscribeRequest, SubscribeResponse},
    view::CardView,
    Error,
};

#[wasm_bindgen(start)]
fn run() -> Result<(), JsValue> {
    // No wall clock for the formatter on wasm32-unknown-unknown.
    tracing_subscriber::fmt::fmt()
        .with_writer(MakeConsoleWriter)
        .without_time()
        .init();

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let Some(button) = document.get_element_by_id("search-btn") else {
        tracing::debug!("no search box on this page");
        return Ok(());
    };
    let input: HtmlInputElement = by_id(&document, "city-search")?.dyn_into()?;

    let page = Page {
        config: Rc::new(load_config(&document)),
        results: by_id(&document, "results-grid")?,
        loading: by_id(&document, "loading")?.dyn_into()?,
        error: by_id(&document, "error-msg")?.dyn_into()?,
        window,
        document,
    };

    {
        let page = page.clone();
        let input = input.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || page.search(&input.value()));
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    {
        let page = page.clone();
        let target = input.clone();
        let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                page.search(&target.value());
            }
        });
        input.add_event_listener_with_callback("keypress", on_key.as_ref().unchecked_ref())?;
        on_key.forget();
    }

    tracing::info!("lookup page ready");
    Ok(())
}

fn by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no #{id} on page")))
}

fn load_config(document: &Document) -> ClientConfig {
    let embedded = document
        .get_element_by_id("aqi-config")
        .and_then(|el| el.text_content());
    match embedded.map(|body| ClientConfig::from_json(&body)) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            tracing::warn!("ignoring malformed page config: {e:?}");
            ClientConfig::default()
        }
        None => ClientConfig::default(),
    }
}

fn show(el: &HtmlElement, visible: bool) {
    let display = if visible { "block" } else { "none" };
    let _ = el.style().set_property("display", display);
}

#[derive(Clone)]
struct Page {
    window: Window,
    document: Document,
    config: Rc<ClientConfig>,
    results: Element,
    loading: HtmlElement,
    error: HtmlElement,
}

impl Page {
    fn search(&self, input: &str) {
        let Some(query) = CityQuery::parse(input) else {
            return;
        };
        show(&self.loading, true);
        show(&self.error, false);
        self.results.set_inner_html("");
        if let Ok(Some(previous)) = self.document.query_selector("[data-timestamp]") {
            previous.remove();
        }

        let url = query.url(&self.config);
        tracing::debug!("fetching {url}");
        let page = self.clone();
        fetch_text(&self.window, &url, None, move |body| {
            show(&page.loading, false);
            let outcome = body
                .and_then(|b| AqiResponse::from_json(&b))
                .and_then(|r| search_outcome(&query, r, &Local::now()));
            let rendered = match outcome {
                Ok(outcome) => page.show_outcome(&outcome),
                Err(e) => {
                    page.show_error(&e);
                    Ok(())
                }
            };
            if let Err(e) = rendered {
                tracing::error!("could not render results: {e:?}");
            }
        });
    }

    fn show_error(&self, e: &Error) {
        match e {
            Error::NoData { .. } => tracing::info!("{e}"),
            _ => tracing::error!("error fetching AQI: {e:?}"),
        }
        self.error.set_text_content(Some(e.to_string().as_str()));
        show(&self.error, true);
    }

    fn show_outcome(&self, outcome: &SearchOutcome) -> Result<(), JsValue> {
        let stamp = self.element("div", "search-timestamp", Some(outcome.searched_at.as_str()))?;
        stamp.set_attribute("data-timestamp", "true")?;
        if let Some(parent) = self.results.parent_element() {
            let before: &Node = &self.results;
            parent.insert_before(&stamp, Some(before))?;
        }
        for record in &outcome.records {
            let card = self.card(&CardView::from(record))?;
            self.results.append_child(&card)?;
        }
        Ok(())
    }

    fn element(&self, tag: &str, class: &str, text: Option<&str>) -> Result<Element, JsValue> {
        let el = self.document.create_element(tag)?;
        if !class.is_empty() {
            el.set_class_name(class);
        }
        if text.is_some() {
            el.set_text_content(text);
        }
        Ok(el)
    }

    fn card(&self, view: &CardView) -> Result<Element, JsValue> {
        let card = self.element("div", "aqi-card", None)?;

        let header = self.element("div", "card-header", None)?;
        let names = self.element("div", "", None)?;
        names.append_child(&self.element("div", "city-name", Some(view.title.as_str()))?)?;
        names.append_child(&self.element("div", "card-subtitle", Some(view.subtitle.as_str()))?)?;
        let figure = self.element("div", "card-figure", None)?;
        figure.append_child(&self.element("div", "aqi-value", Some(view.headline.as_str()))?)?;
        let badge_class = format!("aqi-badge {}", view.badge_class);
        figure.append_child(&self.element("span", badge_class.trim_end(), Some(view.badge))?)?;
        header.append_child(&names)?;
        header.append_child(&figure)?;

        let cells = self.element("div", "measurements", None)?;
        for (label, value) in [
            ("AQI", &view.aqi_cell),
            ("PM2.5", &view.pm25_cell),
            ("PM10", &view.pm10_cell),
        ] {
            let item = self.element("div", "measurement-item", None)?;
            item.append_child(&self.element("span", "m-label", Some(label))?)?;
            item.append_child(&self.element("span", "m-value", Some(value.as_str()))?)?;
            cells.append_child(&item)?;
        }

        let tip = self.element("div", "health-tip", Some(view.tip))?;
        tip.set_attribute(
            "style",
            &format!("border-left: 3px solid {0}; color: {0};", view.tip_color),
        )?;

        let subscribe = self.element(
            "button",
            "btn-primary btn-block",
            Some("Subscribe to Daily Updates"),
        )?;
        {
            let page = self.clone();
            let city = view.subscribe_city.clone();
            let on_click = Closure::<dyn FnMut()>::new(move || {
                if let Err(e) = page.open_modal(&city) {
                    tracing::error!("could not open subscription form: {e:?}");
                }
            });
            subscribe.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            on_click.forget();
        }

        for child in [&header, &cells, &tip, &subscribe] {
            card.append_child(child)?;
        }
        Ok(card)
    }

    fn open_modal(&self, city: &str) -> Result<(), JsValue> {
        let overlay = self.element("div", "modal-overlay", None)?;
        let dialog = self.element("div", "modal", None)?;
        dialog.append_child(&self.element("h2", "", Some("Subscribe to Daily Updates"))?)?;
        dialog.append_child(&self.element(
            "p",
            "",
            Some(format!("Get daily air quality updates for {city} in your inbox.").as_str()),
        )?)?;

        let email: HtmlInputElement = self.element("input", "", None)?.dyn_into()?;
        email.set_type("email");
        email.set_placeholder("Enter your email");
        dialog.append_child(&email)?;

        let buttons = self.element("div", "modal-buttons", None)?;
        let cancel = self.element("button", "btn-secondary", Some("Cancel"))?;
        let submit = self.element("button", "btn-primary", Some("Subscribe"))?;
        buttons.append_child(&cancel)?;
        buttons.append_child(&submit)?;
        dialog.append_child(&buttons)?;
        overlay.append_child(&dialog)?;

        let close = {
            let overlay = overlay.clone();
            move || overlay.remove()
        };

        let on_cancel = Closure::<dyn FnMut()>::new(close.clone());
        cancel.add_event_listener_with_callback("click", on_cancel.as_ref().unchecked_ref())?;
        on_cancel.forget();

        // Clicks on the backdrop close the form; clicks inside it don't.
        let on_backdrop = {
            let close = close.clone();
            Closure::<dyn FnMut(Event)>::new(move |e: Event| {
                let backdrop = match (e.target(), e.current_target()) {
                    (Some(t), Some(c)) => js_sys::Object::is(&t, &c),
                    _ => false,
                };
                if backdrop {
                    close();
                }
            })
        };
        overlay.add_event_listener_with_callback("click", on_backdrop.as_ref().unchecked_ref())?;
        on_backdrop.forget();

        let on_submit = {
            let page = self.clone();
            let city = city.to_owned();
            Closure::<dyn FnMut()>::new(move || page.submit(&email.value(), &city, close.clone()))
        };
        submit.add_event_listener_with_callback("click", on_submit.as_ref().unchecked_ref())?;
        on_submit.forget();

        self.document
            .body()
            .ok_or("no body")?
            .append_child(&overlay)?;
        Ok(())
    }

    fn submit(&self, raw_email: &str, city: &str, close: impl FnOnce() + 'static) {
        let request = match validate_email(raw_email) {
            Ok(email) => SubscribeRequest::new(email, city),
            Err(e) => return self.alert(&e.to_string()),
        };
        let init = match self.subscribe_init(&request) {
            Ok(init) => init,
            Err(e) => {
                tracing::error!("could not build subscription request: {e:?}");
                return self.alert(&Error::SubscribeFailed(format!("{e:?}")).to_string());
            }
        };

        let page = self.clone();
        fetch_text(
            &self.window,
            &self.config.subscribe_endpoint,
            Some(&init),
            move |body| match body.and_then(|b| SubscribeResponse::from_json(&b)) {
                Ok(response) => {
                    let outcome = response.outcome(&request);
                    page.alert(outcome.notice());
                    if let SubscribeOutcome::Subscribed { .. } = outcome {
                        tracing::info!("subscribed to updates for {}", request.city);
                        close();
                    }
                }
                Err(e) => {
                    tracing::error!("subscription failed: {e:?}");
                    page.alert(&Error::SubscribeFailed(format!("{e:?}")).to_string());
                }
            },
        );
    }

    fn subscribe_init(&self, request: &SubscribeRequest) -> Result<RequestInit, JsValue> {
        let cookies = self
            .document
            .dyn_ref::<HtmlDocument>()
            .and_then(|d| d.cookie().ok())
            .unwrap_or_default();
        let headers = Headers::new()?;
        for (name, value) in request.headers(&self.config, &cookies) {
            headers.set(&name, &value)?;
        }
        let body = request
            .body()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));
        Ok(init)
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}

type Pending = Rc<RefCell<Option<Box<dyn FnOnce(Result<String, Error>)>>>>;

/// Run the pending callback, if it has not run already.
fn settle(pending: &Pending, result: Result<String, Error>) {
    let callback = pending.borrow_mut().take();
    if let Some(callback) = callback {
        callback(result)
    }
}

fn js_error(e: JsValue) -> Error {
    Error::Fetch(format!("{e:?}"))
}

/// Fetch a URL and hand its body text to `done`.
fn fetch_text(
    window: &Window,
    url: &str,
    init: Option<&RequestInit>,
    done: impl FnOnce(Result<String, Error>) + 'static,
) {
    let pending: Pending = Rc::new(RefCell::new(Some(Box::new(done))));
    let request = match init {
        Some(init) => window.fetch_with_str_and_init(url, init),
        None => window.fetch_with_str(url),
    };

    let on_response: Closure<dyn FnMut(JsValue)> = {
        let pending = pending.clone();
        Closure::once(move |value: JsValue| {
            let text = value
                .dyn_into::<Response>()
                .map_err(js_error)
                .and_then(|r| r.text().map_err(js_error));
            match text {
                Ok(text) => read_text(text, pending),
                Err(e) => settle(&pending, Err(e)),
            }
        })
    };
    let on_failure: Closure<dyn FnMut(JsValue)> =
        Closure::once(move |e: JsValue| settle(&pending, Err(js_error(e))));

    let _ = request.then(&on_response).catch(&on_failure);
    on_response.forget();
    on_failure.forget();
}

fn read_text(text: Promise, pending: Pending) {
    let on_text: Closure<dyn FnMut(JsValue)> = {
        let pending = pending.clone();
        Closure::once(move |body: JsValue| {
            let body = body
                .as_string()
                .ok_or_else(|| Error::Fetch("response body is not text".to_owned()));
            settle(&pending, body)
        })
    };
    let on_failure: Closure<dyn FnMut(JsValue)> =
        Closure::once(move |e: JsValue| settle(&pending, Err(js_error(e))));

    let _ = text.then(&on_text).catch(&on_failure);
    on_text.forget();
    on_failure.forget();
}

mod console {
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    /// Makes writers that forward formatted log lines to `console.log`.
    pub struct MakeConsoleWriter;

    impl MakeWriter<'_> for MakeConsoleWriter {
        type Writer = MakeConsoleWriter;

        fn make_writer(&'_ self) -> Self::Writer {
            MakeConsoleWriter
        }
    }

    impl std::io::Write for MakeConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let line = String::from_utf8_lossy(buf);
            web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
