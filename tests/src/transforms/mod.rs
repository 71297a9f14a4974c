mod passes;
mod pipeline;
