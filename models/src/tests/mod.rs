mod credentials_builder;
mod outcome;
