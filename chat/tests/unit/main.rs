mod support;

mod test_analyzer;
mod test_history;
mod test_openai;
mod test_server;
mod test_validator;
