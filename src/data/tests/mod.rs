mod iris;
