// Export: TXT, DOCX (zip package) and PDF (external wkhtmltopdf) downloads.

pub mod docx;
pub mod handlers;
pub mod pdf;
pub mod writer;
