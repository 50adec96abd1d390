mod documentation;
mod tokens;
