mod chunking_pipeline_test;
mod page_translator_test;
mod toc_extractor_test;
mod truncator_test;
