mod language_test;
mod model_size_test;
