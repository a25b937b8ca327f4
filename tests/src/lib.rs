#[cfg(test)]
mod integration;
#[cfg(test)]
mod util;
