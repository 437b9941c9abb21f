pub mod post_ingest;
