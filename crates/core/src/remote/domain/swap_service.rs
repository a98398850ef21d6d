/// Domain interface for a hosted face-swap inference service.
pub trait SwapService: Send {
    /// Submit one swap job: source identity bytes + target image bytes.
    ///
    /// Returns the candidate result URLs in service order. An empty vector
    /// means the service produced no output for this item.
    fn submit(
        &self,
        source: &[u8],
        target: &[u8],
    ) -> Result<Vec<String>, Box<dyn std::error::Error>>;

    /// Download a result image. A non-success HTTP status is an error.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>>;
}
