pub mod mnist;

pub use mnist::{load_mnist_csv, read_mnist_csv, target_vector, MnistSample, MNIST_CLASSES, MNIST_PIXELS};
