use fridge_poetry_core::{parse_words, FetchError, Word};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

pub(crate) async fn load_words(url: &str) -> Result<Vec<Word>, FetchError> {
    let text = fetch_text(url).await?;
    let words = parse_words(&text);
    gloo::console::log!(format!("Successfully loaded {} words from CSV.", words.len()));
    Ok(words)
}

async fn fetch_text(url: &str) -> Result<String, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;
    let value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|err| FetchError::Request(format!("{err:?}")))?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| FetchError::Request("fetch did not resolve to a Response".to_string()))?;
    if !response.ok() {
        return Err(FetchError::Status {
            status: response.status(),
            url: url.to_string(),
        });
    }
    let promise = response
        .text()
        .map_err(|err| FetchError::Body(format!("{err:?}")))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|err| FetchError::Body(format!("{err:?}")))?;
    text.as_string()
        .ok_or_else(|| FetchError::Body("response body is not text".to_string()))
}
