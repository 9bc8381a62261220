mod reset_token_test;
mod user_test;
