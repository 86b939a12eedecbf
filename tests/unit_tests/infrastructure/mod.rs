mod in_memory_page_reader_test;
mod plain_text_page_adapter_test;
mod text_sanitizer_test;
